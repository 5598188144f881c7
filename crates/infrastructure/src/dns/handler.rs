use endpoint_dns_application::use_cases::HandleQuestionUseCase;
use endpoint_dns_domain::{Question, RecordType, ANSWER_TTL_SECS};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns one decoded DNS query into a response.
///
/// Every question is mirrored into the response; A questions are
/// resolved against the directory through the use case. A response with
/// no answer records at all is NXDOMAIN — a client cannot tell an
/// absent name from a backend that is down.
pub struct DnsMessageHandler {
    use_case: Arc<HandleQuestionUseCase>,
}

impl DnsMessageHandler {
    pub fn new(use_case: Arc<HandleQuestionUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle(&self, query: &Message) -> Message {
        let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);

        for dns_query in query.queries() {
            response.add_query(dns_query.clone());

            let question = Question::new(
                dns_query.name().to_utf8(),
                RecordType::from_u16(dns_query.query_type().into()),
                dns_query.query_class().into(),
            );

            for address in self.use_case.execute(&question).await {
                response.add_answer(Record::from_rdata(
                    dns_query.name().clone(),
                    ANSWER_TTL_SECS,
                    RData::A(A(address)),
                ));
            }
        }

        if response.answers().is_empty() {
            response.set_response_code(ResponseCode::NXDomain);
        }

        debug!(
            id = response.id(),
            answers = response.answers().len(),
            code = ?response.response_code(),
            "DNS query handled"
        );

        response
    }

    /// Decodes one datagram, handles it, and encodes the response. A
    /// datagram that fails to decode (or a response that fails to
    /// encode) is dropped; only that packet is affected.
    pub async fn handle_datagram(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        let query = match Message::from_vec(datagram) {
            Ok(query) => query,
            Err(e) => {
                warn!(error = %e, len = datagram.len(), "Failed to decode DNS query, dropping packet");
                return None;
            }
        };

        let response = self.handle(&query).await;

        match serialize_message(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(id = response.id(), error = %e, "Failed to encode DNS response, dropping packet");
                None
            }
        }
    }
}

fn serialize_message(message: &Message) -> Result<Vec<u8>, hickory_proto::ProtoError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder)?;
    Ok(buf)
}
