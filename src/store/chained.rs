//! store::chained
//!
//! A local store layered over a secondary, read-only store.
//!
//! This is the view a property handler gives when another handler is
//! configured for the same file type:
//!
//! - Enumeration lists the chained store's keys first, then the local ones
//! - Reads prefer the local store and fall back to the chained store when
//!   the local value is empty
//! - Writes, commits and deletes go to the local store only
//!
//! Files we handle also report [`PRODUCT_NAME`] under
//! `System.Software.ProductName` unless a store sets it explicitly.

use super::traits::{PropertyStoreReader, PropertyStoreWriter, StoreError};
use crate::core::schema::{PKEY_SOFTWARE_PRODUCT_NAME, PRODUCT_NAME};
use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::{PropValue, Scalar};

/// Local store `L` with fallback to chained store `C`.
#[derive(Debug)]
pub struct ChainedStore<L, C> {
    local: L,
    chained: Option<C>,
}

impl<L, C> ChainedStore<L, C>
where
    L: PropertyStoreReader,
    C: PropertyStoreReader,
{
    pub fn new(local: L, chained: Option<C>) -> Self {
        Self { local, chained }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    fn chained_count(&self) -> Result<usize, StoreError> {
        match &self.chained {
            Some(chained) => chained.count(),
            None => Ok(0),
        }
    }
}

impl<L, C> PropertyStoreReader for ChainedStore<L, C>
where
    L: PropertyStoreReader,
    C: PropertyStoreReader,
{
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.chained_count()? + self.local.count()?)
    }

    fn key_at(&self, index: usize) -> Result<PropertyKey, StoreError> {
        let chained_count = self.chained_count()?;
        match &self.chained {
            Some(chained) if index < chained_count => chained.key_at(index),
            _ => self
                .local
                .key_at(index - chained_count)
                .map_err(|e| match e {
                    StoreError::IndexOutOfRange { count, .. } => StoreError::IndexOutOfRange {
                        index,
                        count: count + chained_count,
                    },
                    other => other,
                }),
        }
    }

    fn get_value(&self, key: &PropertyKey) -> Result<PropValue, StoreError> {
        let value = self.local.get_value(key)?;
        if !value.is_empty() {
            return Ok(value);
        }

        if *key == PKEY_SOFTWARE_PRODUCT_NAME {
            return Ok(PropValue::Single(Scalar::LpWStr(PRODUCT_NAME.to_string())));
        }

        match &self.chained {
            Some(chained) => chained.get_value(key),
            None => Ok(value),
        }
    }

    fn format_ids(&self) -> Result<Vec<FormatId>, StoreError> {
        let mut ids = match &self.chained {
            Some(chained) => chained.format_ids()?,
            None => Vec::new(),
        };
        for id in self.local.format_ids()? {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

impl<L, C> PropertyStoreWriter for ChainedStore<L, C>
where
    L: PropertyStoreWriter,
    C: PropertyStoreReader,
{
    fn set_value(&mut self, key: &PropertyKey, value: PropValue) -> Result<(), StoreError> {
        self.local.set_value(key, value)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.local.commit()
    }

    fn delete_format_id(&mut self, fmtid: &FormatId) -> Result<(), StoreError> {
        self.local.delete_format_id(fmtid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn key(set: u128, pid: u32) -> PropertyKey {
        PropertyKey::new(FormatId::from_u128(set), pid)
    }

    fn text(s: &str) -> PropValue {
        PropValue::string(s).unwrap()
    }

    fn stores() -> ChainedStore<MemoryStore, MemoryStore> {
        let mut local = MemoryStore::new();
        local.set_value(&key(1, 1), text("local")).unwrap();
        local.set_value(&key(1, 2), text("shadow")).unwrap();

        let mut chained = MemoryStore::new();
        chained.set_value(&key(2, 1), text("chained")).unwrap();
        chained.set_value(&key(1, 2), text("hidden")).unwrap();

        ChainedStore::new(local, Some(chained))
    }

    #[test]
    fn enumerates_chained_keys_first() {
        let store = stores();
        assert_eq!(store.count().unwrap(), 4);
        assert_eq!(store.key_at(0).unwrap(), key(2, 1));
        assert_eq!(store.key_at(1).unwrap(), key(1, 2));
        assert_eq!(store.key_at(2).unwrap(), key(1, 1));
        assert!(matches!(
            store.key_at(4),
            Err(StoreError::IndexOutOfRange { index: 4, count: 4 })
        ));
    }

    #[test]
    fn local_values_win() {
        let store = stores();
        assert_eq!(store.get_value(&key(1, 2)).unwrap(), text("shadow"));
        assert_eq!(store.get_value(&key(2, 1)).unwrap(), text("chained"));
        assert!(store.get_value(&key(9, 9)).unwrap().is_empty());
    }

    #[test]
    fn reports_product_name_on_local_miss() {
        let store: ChainedStore<MemoryStore, MemoryStore> =
            ChainedStore::new(MemoryStore::new(), None);
        assert_eq!(
            store.get_value(&PKEY_SOFTWARE_PRODUCT_NAME).unwrap(),
            text("FileMetadata")
        );
    }

    #[test]
    fn writes_go_to_local_only() {
        let mut store = stores();
        store.set_value(&key(3, 1), text("new")).unwrap();
        store.commit().unwrap();
        assert_eq!(store.local().commits(), 1);
        assert_eq!(store.local().get_value(&key(3, 1)).unwrap(), text("new"));
        assert_eq!(store.count().unwrap(), 5);
    }

    #[test]
    fn format_ids_are_deduplicated() {
        let store = stores();
        assert_eq!(
            store.format_ids().unwrap(),
            vec![FormatId::from_u128(2), FormatId::from_u128(1)]
        );
    }
}
