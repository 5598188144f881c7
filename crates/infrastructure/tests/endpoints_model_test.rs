use endpoint_dns_infrastructure::directory::{flatten_subsets, Endpoints};

#[test]
fn test_flatten_multiple_subsets_in_order() {
    let json = r#"{
        "kind": "Endpoints",
        "apiVersion": "v1",
        "metadata": { "name": "web", "namespace": "default" },
        "subsets": [
            {
                "addresses": [
                    { "ip": "10.0.0.1", "nodeName": "node-a" },
                    { "ip": "10.0.0.2" }
                ],
                "ports": [ { "port": 8080, "protocol": "TCP" } ]
            },
            {
                "addresses": [ { "ip": "10.0.1.7" } ],
                "ports": [ { "port": 9090, "protocol": "TCP" } ]
            }
        ]
    }"#;

    let endpoints: Endpoints = serde_json::from_str(json).unwrap();
    let addresses = flatten_subsets(endpoints);

    assert_eq!(addresses, vec!["10.0.0.1", "10.0.0.2", "10.0.1.7"]);
}

#[test]
fn test_null_subsets_means_no_addresses() {
    let endpoints: Endpoints =
        serde_json::from_str(r#"{ "metadata": { "name": "idle" }, "subsets": null }"#).unwrap();
    assert!(flatten_subsets(endpoints).is_empty());
}

#[test]
fn test_absent_subsets_means_no_addresses() {
    let endpoints: Endpoints = serde_json::from_str(r#"{ "metadata": { "name": "idle" } }"#).unwrap();
    assert!(flatten_subsets(endpoints).is_empty());
}

#[test]
fn test_subset_without_ready_addresses() {
    let json = r#"{
        "subsets": [
            { "notReadyAddresses": [ { "ip": "10.0.0.9" } ], "ports": [ { "port": 80 } ] }
        ]
    }"#;

    let endpoints: Endpoints = serde_json::from_str(json).unwrap();
    assert!(
        flatten_subsets(endpoints).is_empty(),
        "not-ready addresses are not served"
    );
}
