//! Certificate name attribute extraction operations
//!
//! Extracts distinguished name (DN) attributes from X.509 names using proper
//! ASN.1 string type handling.

use std::collections::HashMap;

use const_oid::db::rfc4519;
use der::asn1::{Ia5StringRef, PrintableStringRef, Utf8StringRef};
use x509_cert::name::Name;

/// Extract the well-known attributes of `name`, keyed by their short name (`CN`, `O`, ...)
#[must_use]
pub fn extract_name_attributes(name: &Name) -> HashMap<String, String> {
    let mut attrs = HashMap::new();

    for rdn in &name.0 {
        for atv in rdn.0.iter() {
            let short_name = match atv.oid {
                rfc4519::CN => "CN",
                rfc4519::O => "O",
                rfc4519::OU => "OU",
                rfc4519::C => "C",
                rfc4519::ST => "ST",
                rfc4519::L => "L",
                _ => continue,
            };

            let value = if let Ok(ps) = PrintableStringRef::try_from(&atv.value) {
                ps.to_string()
            } else if let Ok(utf8s) = Utf8StringRef::try_from(&atv.value) {
                utf8s.to_string()
            } else if let Ok(ia5s) = Ia5StringRef::try_from(&atv.value) {
                ia5s.to_string()
            } else {
                tracing::trace!("skipping {short_name} attribute with unsupported string type");
                continue;
            };

            attrs.insert(short_name.to_string(), value);
        }
    }

    attrs
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_extracts_known_attributes_only() {
        let name = Name::from_str("CN=Leaf,OU=Ops,O=CRYYPT,L=Austin,ST=Texas,C=US,UID=42")
            .unwrap();

        let attrs = extract_name_attributes(&name);

        assert_eq!(attrs.len(), 6);
        assert_eq!(attrs["CN"], "Leaf");
        assert_eq!(attrs["OU"], "Ops");
        assert_eq!(attrs["L"], "Austin");
        assert_eq!(attrs["ST"], "Texas");
        assert_eq!(attrs["C"], "US");
    }
}
