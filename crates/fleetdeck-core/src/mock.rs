// ── Sample alert data ──
//
// Vehicle alerts have no backing endpoint yet; these fixtures stand in for
// one so the alert screens can be built and exercised. The ignition history
// is equally synthetic and is labeled as sample data wherever it renders.

use chrono::{DateTime, Utc};

use crate::model::{Alert, AlertStatus, AlertType, IgnitionEvent};

fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("static timestamp parses")
        .with_timezone(&Utc)
}

/// The fixed set of vehicle alerts shown by the console.
pub fn vehicle_alerts() -> Vec<Alert> {
    vec![
        Alert {
            vehicle_number: "MH12 AB 1234".into(),
            imei: "350000000000101".into(),
            alert_type: AlertType::Tamper,
            status: AlertStatus::Active,
            timestamp: ts("2026-02-11T06:42:00Z"),
            latitude: 18.5204,
            longitude: 73.8567,
        },
        Alert {
            vehicle_number: "MH14 CD 0091".into(),
            imei: "350000000000102".into(),
            alert_type: AlertType::PowerCut,
            status: AlertStatus::Active,
            timestamp: ts("2026-02-11T05:17:00Z"),
            latitude: 18.6298,
            longitude: 73.7997,
        },
        Alert {
            vehicle_number: "KA05 EF 7788".into(),
            imei: "350000000000103".into(),
            alert_type: AlertType::Tamper,
            status: AlertStatus::Resolved,
            timestamp: ts("2026-02-10T22:05:00Z"),
            latitude: 12.9716,
            longitude: 77.5946,
        },
        Alert {
            vehicle_number: "GJ01 GH 4521".into(),
            imei: "350000000000104".into(),
            alert_type: AlertType::PowerCut,
            status: AlertStatus::Resolved,
            timestamp: ts("2026-02-10T18:48:00Z"),
            latitude: 23.0225,
            longitude: 72.5714,
        },
        Alert {
            vehicle_number: "MH12 JK 3307".into(),
            imei: "350000000000105".into(),
            alert_type: AlertType::Tamper,
            status: AlertStatus::Active,
            timestamp: ts("2026-02-10T14:12:00Z"),
            latitude: 18.5089,
            longitude: 73.9260,
        },
        Alert {
            vehicle_number: "TN09 LM 6645".into(),
            imei: "350000000000106".into(),
            alert_type: AlertType::PowerCut,
            status: AlertStatus::Resolved,
            timestamp: ts("2026-02-09T20:33:00Z"),
            latitude: 13.0827,
            longitude: 80.2707,
        },
    ]
}

/// Sample ignition history shown on the alert detail view. Not derived from
/// the alert record.
pub fn ignition_history() -> Vec<IgnitionEvent> {
    vec![
        IgnitionEvent {
            timestamp: ts("2026-02-11T06:40:00Z"),
            ignition_on: false,
            location: "Hinjewadi Phase 2, Pune".into(),
        },
        IgnitionEvent {
            timestamp: ts("2026-02-11T05:55:00Z"),
            ignition_on: true,
            location: "Wakad Bridge, Pune".into(),
        },
        IgnitionEvent {
            timestamp: ts("2026-02-11T04:10:00Z"),
            ignition_on: false,
            location: "Chakan MIDC, Pune".into(),
        },
        IgnitionEvent {
            timestamp: ts("2026-02-10T23:30:00Z"),
            ignition_on: true,
            location: "Chakan MIDC, Pune".into(),
        },
        IgnitionEvent {
            timestamp: ts("2026-02-10T21:02:00Z"),
            ignition_on: false,
            location: "Talegaon Toll Plaza".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_are_stable_fixtures() {
        let alerts = vehicle_alerts();
        assert_eq!(alerts.len(), 6);
        assert!(alerts.iter().any(|a| a.status == AlertStatus::Active));
        assert!(alerts.iter().any(|a| a.alert_type == AlertType::PowerCut));
    }

    #[test]
    fn history_is_newest_first() {
        let history = ignition_history();
        assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
