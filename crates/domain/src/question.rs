use super::RecordType;
use std::sync::Arc;

/// One entry of a query's question section. The class is opaque to this
/// system and only carried so responses can mirror it.
#[derive(Debug, Clone)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: u16,
}

impl Question {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType, class: u16) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
        }
    }
}
