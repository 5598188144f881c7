mod helpers;

use endpoint_dns_application::use_cases::HandleQuestionUseCase;
use endpoint_dns_domain::{DomainError, Question, RecordType};
use helpers::MockEndpointResolver;
use std::net::Ipv4Addr;
use std::sync::Arc;

const CLASS_IN: u16 = 1;

fn make_use_case(resolver: Arc<MockEndpointResolver>) -> HandleQuestionUseCase {
    HandleQuestionUseCase::new(resolver)
}

#[tokio::test]
async fn test_a_question_resolves_in_order() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response("web", vec!["10.0.0.1", "10.0.0.2"]);

    let use_case = make_use_case(resolver.clone());
    let question = Question::new("web.", RecordType::A, CLASS_IN);

    let addresses = use_case.execute(&question).await;

    assert_eq!(
        addresses,
        vec![
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        ]
    );
    assert_eq!(resolver.call_count(), 1);
}

#[tokio::test]
async fn test_lookup_key_strips_trailing_dot() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response("svc.ns.cluster.local", vec!["10.1.2.3"]);

    let use_case = make_use_case(resolver);
    let question = Question::new("svc.ns.cluster.local.", RecordType::A, CLASS_IN);

    let addresses = use_case.execute(&question).await;

    assert_eq!(addresses, vec![Ipv4Addr::new(10, 1, 2, 3)]);
}

#[tokio::test]
async fn test_name_without_dot_used_unchanged() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response("bare-name", vec!["172.16.0.9"]);

    let use_case = make_use_case(resolver);
    let question = Question::new("bare-name", RecordType::A, CLASS_IN);

    let addresses = use_case.execute(&question).await;

    assert_eq!(addresses, vec![Ipv4Addr::new(172, 16, 0, 9)]);
}

#[tokio::test]
async fn test_invalid_address_skipped_not_fatal() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response("web", vec!["10.0.0.1", "not-an-address", "10.0.0.2"]);

    let use_case = make_use_case(resolver);
    let question = Question::new("web.", RecordType::A, CLASS_IN);

    let addresses = use_case.execute(&question).await;

    assert_eq!(
        addresses,
        vec![
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        ]
    );
}

#[tokio::test]
async fn test_ipv6_string_is_not_an_a_answer() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response("web", vec!["fd00::1", "10.0.0.1"]);

    let use_case = make_use_case(resolver);
    let question = Question::new("web.", RecordType::A, CLASS_IN);

    let addresses = use_case.execute(&question).await;

    assert_eq!(addresses, vec![Ipv4Addr::new(10, 0, 0, 1)]);
}

#[tokio::test]
async fn test_empty_result_yields_no_addresses() {
    let resolver = Arc::new(MockEndpointResolver::new());

    let use_case = make_use_case(resolver);
    let question = Question::new("missing.", RecordType::A, CLASS_IN);

    assert!(use_case.execute(&question).await.is_empty());
}

#[tokio::test]
async fn test_resolver_error_treated_as_empty() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response_error(
        "web",
        DomainError::DirectoryLookupFailed {
            endpoint: "web".to_string(),
            reason: "connection refused".to_string(),
        },
    );

    let use_case = make_use_case(resolver);
    let question = Question::new("web.", RecordType::A, CLASS_IN);

    assert!(use_case.execute(&question).await.is_empty());
}

#[tokio::test]
async fn test_aaaa_question_not_resolved() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response("web", vec!["10.0.0.1"]);

    let use_case = make_use_case(resolver.clone());
    let question = Question::new("web.", RecordType::AAAA, CLASS_IN);

    assert!(use_case.execute(&question).await.is_empty());
    assert_eq!(resolver.call_count(), 0, "non-A questions must not hit the directory");
}

#[tokio::test]
async fn test_other_question_not_resolved() {
    let resolver = Arc::new(MockEndpointResolver::new());
    resolver.set_response("web", vec!["10.0.0.1"]);

    let use_case = make_use_case(resolver.clone());
    let question = Question::new("web.", RecordType::Other(16), CLASS_IN);

    assert!(use_case.execute(&question).await.is_empty());
    assert_eq!(resolver.call_count(), 0);
}
