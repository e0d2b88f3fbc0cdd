//! Extraction stage: parser output in, [`ArtifactFacts`] out.
//!
//! Extraction is best effort everywhere except identity metadata. An
//! unreadable method body or a failed permission lookup is recorded as a
//! warning and skipped; only an artifact whose metadata cannot be read at
//! all fails the stage.

use std::path::Path;
use std::sync::Arc;

use crate::error::ExtractError;
use crate::facts::model::ArtifactFacts;
use crate::package::{MethodScan, PackageReader};

/// Call-site fingerprints matched by substring against raw instruction
/// text. Class-type fingerprints contribute the invoked member name;
/// bare member fingerprints contribute themselves.
const API_FINGERPRINTS: &[&str] = &[
    "Landroid/telephony/SmsManager",
    "Landroid/telephony/TelephonyManager",
    "Landroid/location/LocationManager",
    "Landroid/media/MediaRecorder",
    "Landroid/hardware/Camera",
    "Ljavax/crypto",
    "Landroid/content/ContentResolver",
    "sendTextMessage",
    "getDeviceId",
    "getLastKnownLocation",
    "startRecording",
];

/// Structural obfuscation indicators. Substring matching against raw
/// instruction text is approximate: semantically equivalent but
/// differently encoded calls will not match.
const OBFUSCATION_INDICATORS: &[&str] = &[
    "DexClassLoader",
    "Method.invoke",
    "Base64.decode",
    "Cipher",
    "javax.crypto.Cipher",
    "java.lang.reflect.Method",
];

/// Turns an artifact path into structured facts via a [`PackageReader`].
pub struct Extractor {
    reader: Arc<dyn PackageReader>,
}

impl Extractor {
    pub fn new(reader: Arc<dyn PackageReader>) -> Self {
        Self { reader }
    }

    pub fn extract(&self, path: &Path) -> Result<ArtifactFacts, ExtractError> {
        // Identity is the one lookup that must succeed.
        let identity = self.reader.metadata(path)?;

        let mut facts = ArtifactFacts {
            identity,
            ..Default::default()
        };

        match self.reader.permissions(path) {
            Ok(permissions) => facts.permissions = permissions.into_iter().collect(),
            Err(err) => facts
                .warnings
                .push(format!("permission list unavailable: {err}")),
        }

        match self.reader.methods(path) {
            Ok(methods) => {
                for scan in methods {
                    match scan {
                        MethodScan::Body(body) => {
                            for instruction in &body.instructions {
                                scan_instruction(&mut facts, instruction);
                            }
                        }
                        MethodScan::Unreadable { class, reason } => facts
                            .warnings
                            .push(format!("skipped unreadable method body in {class}: {reason}")),
                    }
                }
            }
            Err(err) => facts
                .warnings
                .push(format!("instruction stream unavailable: {err}")),
        }

        // Exported components need manifest parsing, which the reader
        // boundary does not expose yet. The set stays empty.
        Ok(facts)
    }
}

fn scan_instruction(facts: &mut ArtifactFacts, instruction: &str) {
    for fingerprint in API_FINGERPRINTS {
        if instruction.contains(fingerprint) {
            facts
                .api_calls
                .insert(canonical_api_name(instruction, fingerprint));
        }
    }
    for indicator in OBFUSCATION_INDICATORS {
        if instruction.contains(indicator) {
            facts.obfuscation_signals.insert((*indicator).to_string());
        }
    }
}

/// Canonicalizes a matched call site to the invoked member name.
///
/// `invoke-virtual Landroid/telephony/SmsManager;->sendTextMessage(...)`
/// matched on the class fingerprint yields `sendTextMessage`; a bare
/// member fingerprint yields itself.
fn canonical_api_name(instruction: &str, fingerprint: &str) -> String {
    let Some(pos) = instruction.find(fingerprint) else {
        return fingerprint.to_string();
    };

    let tail = instruction[pos + fingerprint.len()..]
        .split('(')
        .next()
        .unwrap_or("");
    let member = tail
        .rsplit("->")
        .next()
        .unwrap_or(tail)
        .trim_matches(|c: char| c == ';' || c.is_whitespace());

    if member.is_empty() {
        fingerprint.to_string()
    } else {
        member.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{MethodBody, PackageMetadata};
    use std::collections::BTreeSet;

    /// In-memory reader standing in for the external parser.
    struct FakeReader {
        metadata: Result<PackageMetadata, String>,
        permissions: Vec<String>,
        methods: Vec<MethodScan>,
    }

    impl FakeReader {
        fn new(name: &str, package: &str) -> Self {
            Self {
                metadata: Ok(PackageMetadata {
                    name: name.into(),
                    package: package.into(),
                    description: None,
                    version: None,
                }),
                permissions: Vec::new(),
                methods: Vec::new(),
            }
        }

        fn body(mut self, instructions: &[&str]) -> Self {
            self.methods.push(MethodScan::Body(MethodBody {
                class: "Lcom/example/Main;".into(),
                name: "run".into(),
                instructions: instructions.iter().map(|s| s.to_string()).collect(),
            }));
            self
        }
    }

    impl PackageReader for FakeReader {
        fn metadata(&self, path: &Path) -> Result<PackageMetadata, ExtractError> {
            self.metadata.clone().map_err(|reason| ExtractError::Metadata {
                path: path.to_path_buf(),
                reason,
            })
        }

        fn permissions(&self, _path: &Path) -> Result<Vec<String>, ExtractError> {
            Ok(self.permissions.clone())
        }

        fn methods(&self, _path: &Path) -> Result<Vec<MethodScan>, ExtractError> {
            Ok(self.methods.clone())
        }
    }

    fn extract(reader: FakeReader) -> ArtifactFacts {
        Extractor::new(Arc::new(reader))
            .extract(Path::new("fixture.apk"))
            .expect("extraction should succeed")
    }

    #[test]
    fn permissions_are_deduplicated() {
        let mut reader = FakeReader::new("App", "com.example.app");
        reader.permissions = vec!["INTERNET".into(), "CAMERA".into(), "INTERNET".into()];

        let facts = extract(reader);
        assert_eq!(
            facts.permissions,
            BTreeSet::from(["INTERNET".to_string(), "CAMERA".to_string()])
        );
    }

    #[test]
    fn class_fingerprint_yields_member_name() {
        let reader = FakeReader::new("App", "com.example.app").body(&[
            "invoke-virtual {v0}, Landroid/telephony/SmsManager;->sendTextMessage(Ljava/lang/String;)V",
        ]);

        let facts = extract(reader);
        assert!(facts.api_calls.contains("sendTextMessage"));
    }

    #[test]
    fn bare_member_fingerprint_yields_itself() {
        let reader =
            FakeReader::new("App", "com.example.app").body(&["invoke-virtual getDeviceId()"]);

        let facts = extract(reader);
        assert!(facts.api_calls.contains("getDeviceId"));
    }

    #[test]
    fn crypto_namespace_fingerprint_yields_member() {
        let reader = FakeReader::new("App", "com.example.app")
            .body(&["invoke-static Ljavax/crypto/Cipher;->getInstance(Ljava/lang/String;)"]);

        let facts = extract(reader);
        assert!(facts.api_calls.contains("getInstance"));
    }

    #[test]
    fn obfuscation_hits_are_recorded_once_per_indicator() {
        let reader = FakeReader::new("App", "com.example.app").body(&[
            "const-class v0, Ldalvik/system/DexClassLoader;",
            "new-instance v1, Ldalvik/system/DexClassLoader;",
            "invoke-static Base64.decode(v2)",
        ]);

        let facts = extract(reader);
        assert_eq!(
            facts.obfuscation_signals,
            BTreeSet::from(["DexClassLoader".to_string(), "Base64.decode".to_string()])
        );
    }

    #[test]
    fn unreadable_method_is_skipped_with_warning() {
        let mut reader = FakeReader::new("App", "com.example.app")
            .body(&["invoke-virtual getLastKnownLocation()"]);
        reader.methods.push(MethodScan::Unreadable {
            class: "Lcom/example/Broken;".into(),
            reason: "truncated body".into(),
        });

        let facts = extract(reader);
        assert!(facts.api_calls.contains("getLastKnownLocation"));
        assert_eq!(facts.warnings.len(), 1);
        assert!(facts.warnings[0].contains("Lcom/example/Broken;"));
    }

    #[test]
    fn metadata_failure_is_fatal() {
        let mut reader = FakeReader::new("App", "com.example.app");
        reader.metadata = Err("manifest missing".into());

        let err = Extractor::new(Arc::new(reader))
            .extract(Path::new("fixture.apk"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Metadata { .. }));
    }

    #[test]
    fn exported_components_stub_is_empty() {
        let facts = extract(FakeReader::new("App", "com.example.app"));
        assert!(facts.exported_components.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let build = || {
            FakeReader::new("App", "com.example.app").body(&[
                "invoke-virtual Landroid/location/LocationManager;->getLastKnownLocation()",
                "invoke-virtual Landroid/hardware/Camera;->open()",
            ])
        };

        let a = extract(build());
        let b = extract(build());
        assert_eq!(a, b);
    }
}
