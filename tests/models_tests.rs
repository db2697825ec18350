// Snapshot decoding tests (upstream JSON, snake_case)

mod common;

use common::*;
use sidelink_dashboard::models::*;
use sidelink_dashboard::render::XValue;

#[test]
fn test_syncref_snapshot_decodes_flattened_link_fields() {
    let s: SyncRefSnapshot = serde_json::from_value(syncref_json()).unwrap();
    assert_eq!(s.link.status, NodeStatus::Running);
    assert_eq!(s.link.frame_slot, "512:3");
    assert_eq!(s.link.pssch.rx_not_ok, 6);
    assert_eq!(s.link.quality.rsrp, -45.0);
    assert_eq!(s.link.quality.quality_level, Some(80.0));
    assert_eq!(s.link.role.as_deref(), Some("Primary Sync Source"));
    assert_eq!(s.tx_power, "23 dBm");
    assert_eq!(s.link.terminal_output.len(), 2);
}

#[test]
fn test_unknown_node_status_is_not_running() {
    for status in ["unknown", "error", "stopped"] {
        let mut json = nearby_json();
        json["status"] = status.into();
        let s: NearbySnapshot = serde_json::from_value(json).unwrap();
        assert!(!s.link.status.is_running(), "{status}");
    }
}

#[test]
fn test_nearby_requires_synchronized_flag() {
    let mut json = nearby_json();
    json.as_object_mut().unwrap().remove("synchronized");
    assert!(serde_json::from_value::<NearbySnapshot>(json).is_err());
}

#[test]
fn test_link_status_ignores_extra_fields() {
    let s: LinkStatusSnapshot = serde_json::from_value(link_status_json()).unwrap();
    assert!(s.link_established);
    assert_eq!(s.overall_quality, 89.9);
    assert_eq!(s.psbch_sync_count, 42);
    assert_eq!(s.nearby_running, Some(true));
}

#[test]
fn test_event_kind_defaults_and_unknown_values() {
    let log: EventLogSnapshot = serde_json::from_value(serde_json::json!({
        "events": [
            { "time": "1", "message": "a" },
            { "time": "2", "message": "b", "type": "warning" },
            { "time": "3", "message": "c", "type": "critical" }
        ]
    }))
    .unwrap();
    let kinds: Vec<&str> = log.events.iter().map(|e| e.kind.css_class()).collect();
    assert_eq!(kinds, ["info", "warning", "info"]);
}

#[test]
fn test_history_and_spectrum_decode() {
    let t: ThroughputHistory = serde_json::from_value(throughput_json(3)).unwrap();
    assert_eq!(t.syncref.len(), 3);
    assert_eq!(t.nearby[2].tx_mbps, 2.0);

    let s: SignalHistory = serde_json::from_value(signal_json(2)).unwrap();
    assert_eq!(s.syncref[1].cqi, 15.0);

    let sp: SpectrumSnapshot = serde_json::from_value(spectrum_json()).unwrap();
    assert!(sp.check_aligned().is_ok());
}

#[test]
fn test_history_accepts_numeric_and_text_timestamps() {
    let t: ThroughputHistory = serde_json::from_value(serde_json::json!({
        "syncref": [
            { "timestamp": 1760695200, "tx_mbps": 1.0, "rx_mbps": 0.5 },
            { "timestamp": "10:00:02", "tx_mbps": 1.2, "rx_mbps": 0.6 }
        ],
        "nearby": []
    }))
    .unwrap();
    assert_eq!(t.syncref[0].timestamp, XValue::Value(1760695200.0));
    assert_eq!(t.syncref[1].timestamp, XValue::Label("10:00:02".into()));

    let s: SignalHistory = serde_json::from_value(serde_json::json!({
        "syncref": [{ "timestamp": 1.5, "rsrp": -45, "sinr": 25, "cqi": 15 }]
    }))
    .unwrap();
    assert_eq!(s.syncref[0].timestamp, XValue::Value(1.5));
}

#[test]
fn test_misaligned_spectrum_reports_lengths() {
    let sp = SpectrumSnapshot {
        frequency: vec![1.0, 2.0],
        channel_response: vec![1.0],
        noise_floor: vec![1.0, 2.0],
    };
    let err = sp.check_aligned().unwrap_err();
    assert!(err.contains("channel_response=1"));
}

#[test]
fn test_message_flow_keeps_step_order() {
    let m: MessageFlowSnapshot = serde_json::from_value(message_flow_json()).unwrap();
    let messages: Vec<&str> = m.flow.iter().map(|s| s.message.as_str()).collect();
    assert_eq!(messages, ["S-SSB", "PSFCH"]);
}
