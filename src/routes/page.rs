// Server-side render of the dashboard page

use std::collections::BTreeMap;

use crate::board::TargetState;
use crate::charts::{MESSAGE_FLOW_DIAGRAM, SIGNAL_CHART, SPECTRUM_CHART, THROUGHPUT_CHART};
use crate::feeds::{
    EVENT_LOG, PACKET_ERROR_RATE, PSBCH_DECODE, PSSCH_DECODE, QUALITY_BAR, TOPOLOGY_STATUS,
};
use crate::render::escape_html;

struct Panel {
    title: &'static str,
    /// (target id, label); an empty label renders the target full width.
    fields: &'static [(&'static str, &'static str)],
}

const PANELS: &[Panel] = &[
    Panel {
        title: "SyncRef UE",
        fields: &[
            ("syncref-status", ""),
            ("syncref-frame-slot", "Frame:Slot"),
            ("syncref-carrier", "Carrier"),
            ("syncref-bandwidth", "Bandwidth"),
            ("syncref-mcs", "MCS"),
            ("syncref-tx-power", "TX Power"),
            ("syncref-psbch-tx", "PSBCH TX"),
            ("syncref-pscch-tx", "PSCCH TX"),
            ("syncref-pssch-tx", "PSSCH TX"),
            ("syncref-psfch-tx", "PSFCH TX"),
            ("syncref-success-rate", "Success Rate"),
            ("syncref-rsrp", "RSRP"),
            ("syncref-sinr", "SINR"),
            ("syncref-cqi", "CQI"),
            ("syncref-errors", "Errors"),
            ("syncref-terminal", ""),
        ],
    },
    Panel {
        title: "Nearby UE",
        fields: &[
            ("nearby-status", ""),
            ("nearby-frame-slot", "Frame:Slot"),
            ("nearby-synced", "Synchronized"),
            ("nearby-carrier", "Carrier"),
            ("nearby-bandwidth", "Bandwidth"),
            ("nearby-mcs", "MCS"),
            ("nearby-rx-gain", "RX Gain"),
            ("nearby-psbch-rx", "PSBCH RX"),
            ("nearby-pscch-rx", "PSCCH RX"),
            ("nearby-pssch-rx", "PSSCH RX"),
            ("nearby-psfch-tx", "PSFCH TX"),
            ("nearby-success-rate", "Success Rate"),
            ("nearby-rsrp", "RSRP"),
            ("nearby-sinr", "SINR"),
            ("nearby-cqi", "CQI"),
            ("nearby-errors", "Errors"),
            ("nearby-terminal", ""),
        ],
    },
    Panel {
        title: "Link",
        fields: &[
            (TOPOLOGY_STATUS, ""),
            (QUALITY_BAR, "Link Quality"),
            (PSSCH_DECODE, "PSSCH Decode"),
            (PSBCH_DECODE, "PSBCH Decode"),
            (PACKET_ERROR_RATE, "Packet Error Rate"),
        ],
    },
    Panel {
        title: "Charts",
        fields: &[
            (THROUGHPUT_CHART, "Throughput"),
            (SIGNAL_CHART, "Signal Quality"),
            (SPECTRUM_CHART, "Spectrum"),
        ],
    },
    Panel {
        title: "Events",
        fields: &[(EVENT_LOG, "")],
    },
    Panel {
        title: "Message Flow",
        fields: &[(MESSAGE_FLOW_DIAGRAM, "")],
    },
];

const SCRIPT: &str = r#"(() => {
  const apply = (p) => {
    const el = document.getElementById(p.target);
    if (!el) return;
    switch (p.op) {
      case "text": el.textContent = p.text; break;
      case "markup": el.innerHTML = p.html; break;
      case "class": el.className = p.class; break;
      case "width": el.style.width = p.percent + "%"; break;
      case "series": el.dataset.series = JSON.stringify(p.series);
                     el.dispatchEvent(new CustomEvent("series")); break;
    }
  };
  const restore = (target, st) => {
    if (st.html !== undefined) apply({ op: "markup", target, html: st.html });
    else if (st.text !== undefined) apply({ op: "text", target, text: st.text });
    if (st.class !== undefined) apply({ op: "class", target, class: st.class });
    if (st.widthPercent !== undefined) apply({ op: "width", target, percent: st.widthPercent });
    if (st.series !== undefined) apply({ op: "series", target, series: st.series });
  };
  const connect = () => {
    const ws = new WebSocket(`${location.protocol === "https:" ? "wss" : "ws"}://${location.host}/ws/board`);
    ws.onmessage = (ev) => {
      const msg = JSON.parse(ev.data);
      if (msg.type === "board") {
        Object.entries(msg.targets).forEach(([target, st]) => restore(target, st));
      } else if (msg.type === "update") {
        msg.patches.forEach(apply);
      }
    };
    ws.onclose = () => setTimeout(connect, 2000);
  };
  connect();
})();"#;

/// One target element with its current content. Text is escaped; markup was
/// built from escaped fragments and goes in as is.
fn render_target(id: &str, state: Option<&TargetState>) -> String {
    let mut attrs = format!("id=\"{}\"", escape_html(id));
    let mut content = String::new();
    if let Some(state) = state {
        if let Some(class) = &state.class {
            attrs.push_str(&format!(" class=\"{}\"", escape_html(class)));
        }
        if let Some(width) = state.width_percent {
            attrs.push_str(&format!(" style=\"width:{}%\"", width));
        }
        if let Some(series) = &state.series
            && let Ok(json) = serde_json::to_string(series)
        {
            attrs.push_str(&format!(" data-series=\"{}\"", escape_html(&json)));
        }
        if let Some(html) = &state.html {
            content.push_str(html);
        } else if let Some(text) = &state.text {
            content.push_str(&escape_html(text));
        }
    }
    format!("<div {}>{}</div>", attrs, content)
}

pub(super) fn render_page(targets: &BTreeMap<String, TargetState>) -> String {
    let mut body = String::new();
    for panel in PANELS {
        body.push_str(&format!(
            "<section class=\"panel\"><h2>{}</h2>",
            escape_html(panel.title)
        ));
        for (id, label) in panel.fields {
            let element = render_target(id, targets.get(*id));
            if label.is_empty() {
                body.push_str(&element);
            } else {
                body.push_str(&format!(
                    "<div class=\"field\"><span class=\"label\">{}</span>{}</div>",
                    escape_html(label),
                    element
                ));
            }
        }
        body.push_str("</section>");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Sidelink Dashboard</title>\n</head>\n<body>\n<main>{}</main>\n\
         <script>{}</script>\n</body>\n</html>\n",
        body, SCRIPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_targets_are_escaped_in_page() {
        let mut targets = BTreeMap::new();
        targets.insert(
            "syncref-frame-slot".to_string(),
            TargetState {
                text: Some("<script>x()</script>".into()),
                ..Default::default()
            },
        );
        let page = render_page(&targets);
        assert!(page.contains(
            "<div id=\"syncref-frame-slot\">&lt;script&gt;x()&lt;/script&gt;</div>"
        ));
        assert!(!page.contains("<script>x()"));
    }

    #[test]
    fn width_and_class_become_attributes() {
        let html = render_target(
            "quality-bar-fill",
            Some(&TargetState {
                text: Some("80% ✅ GOOD".into()),
                class: Some("bar".into()),
                width_percent: Some(80.0),
                ..Default::default()
            }),
        );
        assert_eq!(
            html,
            "<div id=\"quality-bar-fill\" class=\"bar\" style=\"width:80%\">80% ✅ GOOD</div>"
        );
    }

    #[test]
    fn script_restores_full_board_on_connect() {
        use crate::board::BoardMessage;

        let mut targets = BTreeMap::new();
        targets.insert(
            "quality-bar-fill".to_string(),
            TargetState {
                text: Some("80% ✅ GOOD".into()),
                width_percent: Some(80.0),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(BoardMessage::Board { targets }).unwrap();
        assert_eq!(json["type"], "board");
        assert!(SCRIPT.contains(r#"msg.type === "board""#));
        assert!(SCRIPT.contains("Object.entries(msg.targets)"));

        // Every field the board message carries is restored by the script.
        for key in json["targets"]["quality-bar-fill"].as_object().unwrap().keys() {
            assert!(SCRIPT.contains(&format!("st.{key}")), "{key} not restored");
        }
        for key in ["html", "class", "series"] {
            assert!(SCRIPT.contains(&format!("st.{key}")), "{key} not restored");
        }
    }

    #[test]
    fn missing_targets_render_empty() {
        assert_eq!(render_target("event-log", None), "<div id=\"event-log\"></div>");
    }
}
