pub mod detect;
pub mod model;

pub use detect::{detect, flag_dangerous_permissions};

/// Permissions considered dangerous when requested outside the expected
/// profile. Membership is checked exactly against declared permission
/// names.
pub const DANGEROUS_PERMISSIONS: &[&str] = &[
    "SEND_SMS",
    "CALL_PHONE",
    "READ_CONTACTS",
    "READ_SMS",
    "WRITE_SMS",
    "RECORD_AUDIO",
    "CAMERA",
    "ACCESS_FINE_LOCATION",
    "READ_PHONE_STATE",
    "INSTALL_PACKAGES",
    "REQUEST_INSTALL_PACKAGES",
    "GET_ACCOUNTS",
    "BIND_ACCESSIBILITY_SERVICE",
    "WRITE_SETTINGS",
    "RECEIVE_BOOT_COMPLETED",
];

/// API names considered dangerous when observed outside the expected
/// profile. Matched by case-insensitive substring.
pub const DANGEROUS_APIS: &[&str] = &[
    "sendTextMessage",
    "getDeviceId",
    "getLastKnownLocation",
    "startRecording",
    "Method.invoke",
    "DexClassLoader",
];
