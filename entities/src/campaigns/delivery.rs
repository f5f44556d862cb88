//! Raw delivery-status vocabulary of the SMS gateway. The gateway reports
//! terminal statuses in inconsistent casings, so membership checks always
//! run on the normalized form.

pub const DELIVERED_STATUS_VALUES: [&str; 4] = ["delivered", "delivrd", "completed", "ok"];

pub const FAILED_STATUS_VALUES: [&str; 6] = [
    "failure",
    "failed",
    "undelivered",
    "expired",
    "rejected",
    "error",
];

pub fn normalize_delivery_status(raw: Option<&str>) -> Option<String> {
    let normalized = raw?.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

pub fn is_delivered_status(raw: Option<&str>) -> bool {
    normalize_delivery_status(raw)
        .map_or(false, |status| DELIVERED_STATUS_VALUES.contains(&status.as_str()))
}

pub fn is_failed_status(raw: Option<&str>) -> bool {
    normalize_delivery_status(raw)
        .map_or(false, |status| FAILED_STATUS_VALUES.contains(&status.as_str()))
}
