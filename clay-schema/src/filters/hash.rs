use crate::{
    data::{Setting, SettingKind},
    error::Result,
};

use super::message_key;

/// Name of the hash behind [`stable_hash`], recorded in generated output.
pub const HASH_ALGORITHM: &str = "fnv1a-32";

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Text that [`stable_hash`] digests.
///
/// The message key, with the option count appended for a checkboxgroup so
/// that changing its options invalidates what was persisted before.
pub fn hash_key(setting: &Setting) -> Result<String> {
    let key = message_key(setting)?;
    Ok(match setting.kind {
        SettingKind::Checkboxgroup => format!("{key}[{}]", setting.options().len()),
        _ => key.to_string(),
    })
}

/// Persistent storage key of a setting.
///
/// Identical for identical input across runs and platforms.
pub fn stable_hash(setting: &Setting) -> Result<u32> {
    Ok(fnv1a_32(hash_key(setting)?.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SelectOption;

    #[test]
    fn test_fnv_vectors() {
        assert_eq!(fnv1a_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_hash_is_stable() {
        let mut setting = Setting::new(SettingKind::Toggle);
        setting.message_key = Some("enable".to_string());
        assert_eq!(stable_hash(&setting).unwrap(), fnv1a_32(b"enable"));
        assert_eq!(stable_hash(&setting).unwrap(), stable_hash(&setting.clone()).unwrap());
    }

    #[test]
    fn test_checkboxgroup_includes_option_count() {
        let mut setting = Setting::new(SettingKind::Checkboxgroup);
        setting.message_key = Some("food".to_string());
        setting.options = Some(vec![
            SelectOption::new("Sushi", "sushi"),
            SelectOption::new("Pizza", "pizza"),
        ]);
        assert_eq!(hash_key(&setting).unwrap(), "food[2]");

        let before = stable_hash(&setting).unwrap();
        setting.options.as_mut().unwrap().push(SelectOption::new("Tacos", "tacos"));
        assert_ne!(stable_hash(&setting).unwrap(), before);
    }

    #[test]
    fn test_distinct_keys_differ() {
        let mut a = Setting::new(SettingKind::Input);
        a.message_key = Some("first".to_string());
        let mut b = a.clone();
        b.message_key = Some("second".to_string());
        assert_ne!(stable_hash(&a).unwrap(), stable_hash(&b).unwrap());
    }

    #[test]
    fn test_missing_identifier() {
        assert!(stable_hash(&Setting::new(SettingKind::Slider)).is_err());
    }
}
