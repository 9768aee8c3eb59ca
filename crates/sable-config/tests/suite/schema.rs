use sable_config::json_schema;

#[test]
fn schema_describes_both_sections() {
    let schema = serde_json::to_value(json_schema()).unwrap();
    let properties = schema["properties"].as_object().unwrap();
    assert!(properties.contains_key("logging"));
    assert!(properties.contains_key("dispatch"));
    assert_eq!(schema["additionalProperties"], serde_json::Value::Bool(false));
}

#[test]
fn schema_lists_diamond_policies() {
    let text = serde_json::to_string(&json_schema()).unwrap();
    assert!(text.contains("discovery_order"), "{text}");
    assert!(text.contains("strict"), "{text}");
}
