//! Custom order status log.
//!
//! Orders carry a custom fulfillment status on top of Shopify's own. The
//! current value lives in an order metafield, the full history in a second
//! JSON metafield, and a denormalized `fcos:<status>` tag makes orders
//! filterable by status in the Shopify admin.
//!
//! The log is append-only: one entry per accepted transition, in
//! chronological order. Re-submitting the current status never appends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of the order tag mirroring the current custom status.
pub const FCOS_TAG_PREFIX: &str = "fcos:";

/// One accepted status transition.
///
/// Field names are camelCase because this is the stored metafield format.
/// Missing fields read as empty so one short entry cannot make the whole
/// history unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusLogEntry {
    pub order_no: String,
    /// UTC date, `YYYY-MM-DD`.
    pub date: String,
    /// UTC time, `HH:MM:SS`.
    pub time: String,
    pub from_status: String,
    pub to_status: String,
    pub user_name: String,
    pub store_name: String,
}

/// The staff member making a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub first_name: String,
    pub last_name: String,
}

impl Actor {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last", without stray spaces when either part is missing.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Whether `new_status` is an actual transition away from `current_status`.
#[must_use]
pub fn is_status_change(new_status: &str, current_status: &str) -> bool {
    !new_status.trim().is_empty() && new_status != current_status
}

/// Append a transition to the log if the status actually changed.
///
/// A blank `new_status`, or one equal to `current_status`, returns `prior`
/// unchanged.
#[must_use]
pub fn reconcile_status_log(
    prior: &[StatusLogEntry],
    new_status: &str,
    current_status: &str,
    actor: &Actor,
    store: &str,
    order_no: &str,
    now: DateTime<Utc>,
) -> Vec<StatusLogEntry> {
    let mut log = prior.to_vec();
    if !is_status_change(new_status, current_status) {
        return log;
    }

    log.push(StatusLogEntry {
        order_no: order_no.to_string(),
        date: now.format("%Y-%m-%d").to_string(),
        time: now.format("%H:%M:%S").to_string(),
        from_status: current_status.to_string(),
        to_status: new_status.to_string(),
        user_name: actor.display_name(),
        store_name: store.to_string(),
    });
    log
}

/// A configured status, loaded from the `order_status` metaobjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    pub name: String,
    /// Sort key; definitions are shown in ascending position.
    #[serde(default)]
    pub position: i32,
}

/// A status definition annotated for the progress display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStep {
    pub name: String,
    pub completed: bool,
    pub active_step: bool,
}

/// Mark completed statuses and the next one to work on.
///
/// The last completed status is the most recent `to_status` in the log. If
/// that status is no longer configured, the furthest configured status that
/// appears anywhere in the log is used instead. The status after it is the
/// active step; when the log has reached the final status, no step is active.
#[must_use]
pub fn derive_status_steps(
    definitions: &[StatusDefinition],
    log: &[StatusLogEntry],
) -> Vec<StatusStep> {
    let mut ordered: Vec<&StatusDefinition> = definitions.iter().collect();
    ordered.sort_by_key(|d| d.position);

    let last_completed = log
        .last()
        .and_then(|entry| ordered.iter().position(|d| d.name == entry.to_status))
        .or_else(|| {
            ordered
                .iter()
                .rposition(|d| log.iter().any(|entry| entry.to_status == d.name))
        });

    let active = last_completed.map_or(0, |index| index + 1);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, definition)| StatusStep {
            name: definition.name.clone(),
            completed: last_completed.is_some_and(|last| index <= last),
            active_step: index == active,
        })
        .collect()
}

/// The tag that mirrors `status`.
#[must_use]
pub fn fcos_tag(status: &str) -> String {
    format!("{FCOS_TAG_PREFIX}{status}")
}

/// Replace every `fcos:` tag with exactly one for `status`.
#[must_use]
pub fn retag_with_status(tags: &[String], status: &str) -> Vec<String> {
    let mut retagged: Vec<String> = tags
        .iter()
        .filter(|t| !t.starts_with(FCOS_TAG_PREFIX))
        .cloned()
        .collect();
    retagged.push(fcos_tag(status));
    retagged
}

/// The status encoded in the order's tags, if any.
#[must_use]
pub fn status_from_tags(tags: &[String]) -> Option<&str> {
    tags.iter()
        .rev()
        .find_map(|t| t.strip_prefix(FCOS_TAG_PREFIX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn actor() -> Actor {
        Actor::new("Ada", "Lovelace")
    }

    fn definitions() -> Vec<StatusDefinition> {
        vec![
            StatusDefinition {
                name: "Packed".to_string(),
                position: 2,
            },
            StatusDefinition {
                name: "Received".to_string(),
                position: 1,
            },
            StatusDefinition {
                name: "Collected".to_string(),
                position: 3,
            },
        ]
    }

    fn entry(to: &str) -> StatusLogEntry {
        StatusLogEntry {
            order_no: "#1001".to_string(),
            date: "2026-03-14".to_string(),
            time: "09:00:00".to_string(),
            from_status: String::new(),
            to_status: to.to_string(),
            user_name: "Ada Lovelace".to_string(),
            store_name: "corner-grocer".to_string(),
        }
    }

    #[test]
    fn test_same_status_is_idempotent() {
        let prior = vec![entry("Received")];
        let log = reconcile_status_log(
            &prior,
            "Received",
            "Received",
            &actor(),
            "corner-grocer",
            "#1001",
            now(),
        );
        assert_eq!(log, prior);
    }

    #[test]
    fn test_blank_status_is_ignored() {
        let log = reconcile_status_log(&[], "  ", "Received", &actor(), "s", "#1", now());
        assert!(log.is_empty());
    }

    #[test]
    fn test_transition_appends_entry() {
        let prior = vec![entry("Received")];
        let log = reconcile_status_log(
            &prior,
            "Packed",
            "Received",
            &actor(),
            "corner-grocer",
            "#1001",
            now(),
        );

        assert_eq!(log.len(), 2);
        assert_eq!(log[0], prior[0]);
        let appended = &log[1];
        assert_eq!(appended.from_status, "Received");
        assert_eq!(appended.to_status, "Packed");
        assert_eq!(appended.date, "2026-03-14");
        assert_eq!(appended.time, "09:26:53");
        assert_eq!(appended.user_name, "Ada Lovelace");
        assert_eq!(appended.store_name, "corner-grocer");
        assert_eq!(appended.order_no, "#1001");
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let json = serde_json::to_value(entry("Packed")).unwrap();
        assert_eq!(json["toStatus"], "Packed");
        assert_eq!(json["orderNo"], "#1001");
        assert!(json.get("to_status").is_none());
    }

    #[test]
    fn test_display_name_trims_missing_parts() {
        assert_eq!(Actor::new("Ada", "").display_name(), "Ada");
        assert_eq!(Actor::new("", "Lovelace").display_name(), "Lovelace");
    }

    #[test]
    fn test_steps_with_empty_log_activate_first() {
        let steps = derive_status_steps(&definitions(), &[]);
        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Received", "Packed", "Collected"]);
        assert!(steps[0].active_step);
        assert!(steps.iter().all(|s| !s.completed));
    }

    #[test]
    fn test_steps_mark_next_after_last_completed() {
        let steps = derive_status_steps(&definitions(), &[entry("Received")]);

        assert!(steps[0].completed);
        assert!(!steps[0].active_step);
        assert!(steps[1].active_step);
        assert!(!steps[2].active_step);
    }

    #[test]
    fn test_steps_terminal_has_no_active() {
        let log = vec![entry("Received"), entry("Packed"), entry("Collected")];
        let steps = derive_status_steps(&definitions(), &log);

        assert!(steps.iter().all(|s| s.completed));
        assert!(steps.iter().all(|s| !s.active_step));
    }

    #[test]
    fn test_steps_fall_back_when_latest_status_unconfigured() {
        let log = vec![entry("Received"), entry("On Hold")];
        let steps = derive_status_steps(&definitions(), &log);
        assert!(steps[1].active_step);
    }

    #[test]
    fn test_retag_replaces_previous_status_tags() {
        let tags = vec![
            "wholesale".to_string(),
            "fcos:Received".to_string(),
            "fcos:Stale".to_string(),
        ];
        let retagged = retag_with_status(&tags, "Packed");
        assert_eq!(retagged, vec!["wholesale".to_string(), "fcos:Packed".to_string()]);
        assert_eq!(status_from_tags(&retagged), Some("Packed"));
    }

    #[test]
    fn test_status_from_tags_none() {
        assert_eq!(status_from_tags(&["wholesale".to_string()]), None);
    }

    #[test]
    fn test_short_stored_entry_still_parses() {
        let raw = r##"[{"orderNo":"#1001","date":"2026-03-01","time":"08:00:00","fromStatus":"","toStatus":"Received","userName":"Ada Lovelace"},{"orderNo":"#1001","date":"2026-03-02","time":"08:00:00","fromStatus":"Received","toStatus":"Packed","userName":"Ada Lovelace","storeName":"corner-grocer"}]"##;
        let prior: Vec<StatusLogEntry> = serde_json::from_str(raw).unwrap();

        assert_eq!(prior.len(), 2);
        assert_eq!(prior[0].store_name, "");
        assert_eq!(prior[0].to_status, "Received");

        let log = reconcile_status_log(
            &prior,
            "Collected",
            "Packed",
            &actor(),
            "corner-grocer",
            "#1001",
            now(),
        );
        assert_eq!(log.len(), 3);
        assert_eq!(&log[..2], prior.as_slice());
    }
}
