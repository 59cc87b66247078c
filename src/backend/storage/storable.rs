// src/backend/storage/storable.rs
use ic_stable_structures::{storable::Bound, Storable};
use serde::{de::DeserializeOwned, Serialize};
use std::borrow::Cow;

/// Wraps any serde type to make it Storable using CBOR encoding.
///
/// Bytes that fail to decode come back as `T::default()` (logged), so a damaged cell
/// degrades to its initial value instead of trapping the canister.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cbor<T>(pub T)
where
    T: Serialize + DeserializeOwned + Default;

impl<T> Storable for Cbor<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    fn to_bytes(&self) -> Cow<[u8]> {
        let mut writer = vec![];
        if let Err(e) = ciborium::ser::into_writer(&self.0, &mut writer) {
            tracing::error!(error = %e, "failed to encode value as CBOR for stable storage");
            writer.clear();
        }
        Cow::Owned(writer)
    }

    fn from_bytes(bytes: Cow<[u8]>) -> Self {
        match ciborium::de::from_reader(bytes.as_ref()) {
            Ok(value) => Cbor(value),
            Err(e) => {
                tracing::error!(error = %e, "failed to decode CBOR from stable storage, using default");
                Cbor(T::default())
            }
        }
    }

    const BOUND: Bound = Bound::Unbounded;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::init::PlannerConfig;
    use crate::models::Locale;

    #[test]
    fn cbor_round_trips_config() {
        let config = PlannerConfig { locale: Locale::EnCa, max_record_bytes: 10, backup_enabled: false };
        let wrapped = Cbor(config.clone());
        let bytes = wrapped.to_bytes();
        assert_eq!(Cbor::<PlannerConfig>::from_bytes(bytes).0, config);
    }

    #[test]
    fn garbage_bytes_decode_to_default() {
        let decoded = Cbor::<PlannerConfig>::from_bytes(Cow::Borrowed(&[0xff, 0x00, 0x13]));
        assert_eq!(decoded.0, PlannerConfig::default());
    }
}
