use serde_json::{json, Value};
use timestep_switch_core::{SwitchCfg, TimedItem, Window};
use timestep_switch_host::*;

fn inputs(v: Value) -> serde_json::Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => panic!("test inputs must be an object"),
    }
}

fn window_of(entry: &Value) -> (f64, f64) {
    let p = &entry[1];
    (p["start_percent"].as_f64().unwrap(), p["end_percent"].as_f64().unwrap())
}

#[test]
fn descriptor_matches_host_contract() {
    let d = switch_descriptor();
    assert_eq!(d.id, "ConditioningTimestepSwitch");
    assert_eq!(d.display_name, "Conditioning Timestep Switch");
    assert_eq!(d.category, "advanced/conditioning");
    assert_eq!(d.function, "switch_conditioning");
    assert_eq!(d.return_types, vec!["CONDITIONING"]);

    assert!(d.is_required("conditioning_1"));
    assert!(d.is_required("threshold"));
    assert!(!d.is_required("conditioning_2"));
    assert!(d.input("conditioning_2").is_some());

    match &d.input("threshold").unwrap().kind {
        InputKind::Float { default, min, max, step } => {
            assert!(*default >= 0.1 && *default <= 0.5);
            assert_eq!((*min, *max, *step), (0.0, 1.0, 0.01));
        }
        other => panic!("threshold should be a float input, got {:?}", other),
    }
}

#[test]
fn descriptor_serializes_with_type_tags() {
    let v = serde_json::to_value(switch_descriptor()).unwrap();
    assert_eq!(v["required"][0]["name"], "conditioning_1");
    assert_eq!(v["required"][0]["type"], "CONDITIONING");
    assert_eq!(v["required"][1]["type"], "FLOAT");
    assert_eq!(v["required"][1]["step"], 0.01);
    assert_eq!(v["optional"][0]["name"], "conditioning_2");
}

#[test]
fn registry_maps_ids_to_display_names() {
    let mut reg = NodeRegistry::with_builtin();
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.display_name(SWITCH_NODE_ID), Some(SWITCH_DISPLAY_NAME));
    assert_eq!(reg.display_names(), vec![(SWITCH_NODE_ID, SWITCH_DISPLAY_NAME)]);
    assert!(reg.require(SWITCH_NODE_ID).is_ok());
    assert!(matches!(reg.require("KSampler"), Err(HostError::UnknownNode(id)) if id == "KSampler"));

    // Re-registering replaces in place.
    assert!(reg.register(switch_descriptor()).is_some());
    assert_eq!(reg.len(), 1);
}

#[test]
fn invoke_splits_host_records() {
    let node = TimestepSwitchNode::default();
    let out = node
        .invoke(&inputs(json!({
            "conditioning_1": [["cond-a", {"pooled_output": [1, 2], "start_percent": 0.0, "end_percent": 1.0}]],
            "threshold": 0.4,
            "conditioning_2": [["cond-b", {}]],
        })))
        .unwrap();

    let list = out.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0][0], "cond-a");
    assert_eq!(list[0][1]["pooled_output"], json!([1, 2]));
    assert_eq!(list[1][0], "cond-b");

    let (s0, e0) = window_of(&list[0]);
    let (s1, e1) = window_of(&list[1]);
    assert!((s0 - 0.0).abs() < 1e-9 && (e0 - 0.401).abs() < 1e-9);
    assert!((s1 - 0.401).abs() < 1e-9 && (e1 - 1.0).abs() < 1e-9);
}

#[test]
fn invoke_without_second_conditioning() {
    let node = TimestepSwitchNode::new(SwitchCfg::exact());
    for c2 in [None, Some(Value::Null)] {
        let mut m = inputs(json!({
            "conditioning_1": [["a", {}], ["b", {"start_percent": 0.6, "end_percent": 0.8}]],
            "threshold": 0.3,
        }));
        if let Some(v) = c2 {
            m.insert("conditioning_2".into(), v);
        }
        let out = node.invoke(&m).unwrap();
        let list = out.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(window_of(&list[0]), (0.0, 0.3));
        assert_eq!(window_of(&list[1]), (1.0, 0.0));
    }
}

#[test]
fn invoke_accepts_out_of_range_threshold() {
    let node = TimestepSwitchNode::default();
    let out = node
        .invoke(&inputs(json!({
            "conditioning_1": [["a", {}]],
            "threshold": 7.5,
            "conditioning_2": [["b", {}]],
        })))
        .unwrap();
    assert_eq!(window_of(&out[0]), (0.0, 1.0));
    assert_eq!(window_of(&out[1]), (1.0, 0.0));
}

#[test]
fn invoke_rejects_bad_inputs() {
    let node = TimestepSwitchNode::default();

    let err = node.invoke(&inputs(json!({"threshold": 0.5}))).unwrap_err();
    assert!(matches!(err, HostError::MissingInput("conditioning_1")));

    let err = node.invoke(&inputs(json!({"conditioning_1": []}))).unwrap_err();
    assert!(matches!(err, HostError::MissingInput("threshold")));

    let err = node
        .invoke(&inputs(json!({"conditioning_1": [], "threshold": "half"})))
        .unwrap_err();
    assert!(matches!(err, HostError::InputType { name: "threshold", .. }));

    let err = node
        .invoke(&inputs(json!({"conditioning_1": [["a"]], "threshold": 0.5})))
        .unwrap_err();
    assert!(matches!(err, HostError::MalformedEntry { index: 0, .. }));

    let err = node
        .invoke(&inputs(json!({"conditioning_1": [["a", {}], ["b", 3]], "threshold": 0.5})))
        .unwrap_err();
    assert!(matches!(err, HostError::MalformedEntry { index: 1, .. }));

    let err = node.invoke_json_str("[1, 2]").unwrap_err();
    assert!(matches!(err, HostError::InputType { name: "inputs", .. }));

    let err = node.invoke_json_str("{not json").unwrap_err();
    assert!(matches!(err, HostError::Json(_)));
}

#[test]
fn adapter_keeps_entries_without_params_active() {
    let items = decode_json_str(r#"[["a", null]]"#).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].window(), Window::FULL);

    let encoded = JsonConditioningAdapter.encode(&items);
    assert_eq!(encoded, json!([["a", {}]]));
}

#[test]
fn typed_entry_point_with_custom_reference() {
    #[derive(Clone, Debug, PartialEq)]
    struct Handle(u64);

    struct HandleAdapter;

    impl ConditioningAdapter for HandleAdapter {
        type Ref = Handle;

        fn decode(&self, _value: &Value) -> HostResult<Vec<TimedItem<Handle>>> {
            Ok(Vec::new())
        }

        fn encode(&self, items: &[TimedItem<Handle>]) -> Value {
            json!(items.len())
        }
    }

    let node = TimestepSwitchNode::with_adapter(SwitchCfg::exact(), HandleAdapter);
    let c1 = vec![TimedItem::bare(Handle(7))];
    let c2 = vec![TimedItem::bare(Handle(9))];
    let out = node.switch_conditioning(&c1, 0.25, Some(&c2[..]));

    assert_eq!(out[0].reference, Handle(7));
    assert_eq!(out[0].window(), Window::new(0.0, 0.25));
    assert_eq!(out[1].reference, Handle(9));
    assert_eq!(out[1].window(), Window::new(0.25, 1.0));
}

#[test]
fn host_cfg_from_json() {
    let cfg = HostCfg::from_json_str(r#"{"debug_log": false, "switch": {"boundary_epsilon": 0.0}}"#).unwrap();
    assert_eq!(cfg.switch, SwitchCfg::exact());
    assert!(!cfg.debug_log);

    let cfg = HostCfg::from_json_str("{}").unwrap();
    assert_eq!(cfg, HostCfg::default());

    let err = HostCfg::from_json_str(r#"{"switch": {"boundary_epsilon": -1.0}}"#).unwrap_err();
    assert!(matches!(err, HostError::Cfg(_)));
}

#[test]
fn host_cfg_reads_debug_env() {
    std::env::set_var(DEBUG_ENV, "1");
    assert!(HostCfg::from_env().debug_log);
    std::env::set_var(DEBUG_ENV, "off");
    assert!(!HostCfg::from_env().debug_log);
    std::env::remove_var(DEBUG_ENV);
    assert!(!HostCfg::from_env().debug_log);
}

#[test]
fn json_strs_entry_point_matches_invoke() {
    let node = TimestepSwitchNode::new(SwitchCfg::exact());
    let c1 = r#"[["a", {"strength": 0.5}]]"#;
    let c2 = r#"[["b", {}]]"#;

    let direct = node.switch_json_strs(c1, 0.25, Some(c2)).unwrap();
    let by_name = node
        .invoke_json_str(&format!(r#"{{"conditioning_1": {}, "threshold": 0.25, "conditioning_2": {}}}"#, c1, c2))
        .unwrap();
    assert_eq!(direct, by_name);
    assert_eq!(window_of(&direct[0]), (0.0, 0.25));
    assert_eq!(window_of(&direct[1]), (0.25, 1.0));

    let only_first = node.switch_json_strs(c1, 0.25, None).unwrap();
    assert_eq!(only_first.as_array().unwrap().len(), 1);

    assert!(matches!(node.switch_json_strs("{", 0.25, None), Err(HostError::Json(_))));
}

#[test]
fn json_strs_entry_point_uses_node_adapter() {
    struct CountingAdapter;

    impl ConditioningAdapter for CountingAdapter {
        type Ref = u8;

        fn decode(&self, value: &Value) -> HostResult<Vec<TimedItem<u8>>> {
            let n = value.as_u64().unwrap_or(0) as usize;
            Ok(vec![TimedItem::bare(0u8); n])
        }

        fn encode(&self, items: &[TimedItem<u8>]) -> Value {
            json!({"count": items.len(), "silenced": items.iter().filter(|i| i.is_silenced()).count()})
        }
    }

    let node = TimestepSwitchNode::with_adapter(SwitchCfg::default(), CountingAdapter);
    let out = node.switch_json_strs("3", 1.0, Some("2")).unwrap();
    assert_eq!(out, json!({"count": 5, "silenced": 2}));
}
