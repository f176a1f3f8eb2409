//! Shared checks run against every store implementation.

use std::error::Error;

use super::{ListableStorageTraits, ReadableStorageTraits, StorePrefix, WritableStorageTraits};

/// Create a store with the following data
/// ```text
/// - a/
///   - b [0, 1, 2, 3]
///   - c [0]
///   - d/
///     - e
///   - f/
///     - g
///     - h
/// - i/
///   - j/
///     - k [0, 1]
/// ```
pub fn store_write<T: WritableStorageTraits + ?Sized>(store: &T) -> Result<(), Box<dyn Error>> {
    store.erase_prefix(&StorePrefix::root())?;

    store.set(&"a/b".try_into()?, vec![255, 255, 255].into())?;
    store.set(&"a/b".try_into()?, vec![0, 1, 2, 3].into())?; // overwrite
    store.set(&"a/c".try_into()?, vec![0].into())?;
    store.set(&"a/d/e".try_into()?, vec![].into())?;
    store.set(&"a/f/g".try_into()?, vec![].into())?;
    store.set(&"a/f/h".try_into()?, vec![].into())?;
    store.set(&"i/j/k".try_into()?, vec![0, 1].into())?;

    store.set(&"erase".try_into()?, vec![].into())?;
    store.erase(&"erase".try_into()?)?;
    store.erase(&"erase".try_into()?)?; // succeeds

    store.set(&"erase_values_0".try_into()?, vec![].into())?;
    store.set(&"erase_values_1".try_into()?, vec![].into())?;
    store.erase_values(&["erase_values_0".try_into()?, "erase_values_1".try_into()?])?;

    store.set(&"erase_prefix/0".try_into()?, vec![].into())?;
    store.set(&"erase_prefix/1".try_into()?, vec![].into())?;
    store.erase_prefix(&"erase_prefix/".try_into()?)?;

    Ok(())
}

/// Read from the store and check the data matches the expected values after [`store_write`].
pub fn store_read<T: ReadableStorageTraits + ?Sized>(store: &T) -> Result<(), Box<dyn Error>> {
    assert!(store.get(&"notfound".try_into()?)?.is_none());
    assert!(!store.exists(&"notfound".try_into()?)?);
    assert!(store.get(&"erase".try_into()?)?.is_none());
    assert!(store.get(&"erase_prefix/0".try_into()?)?.is_none());
    assert_eq!(
        store.get(&"a/b".try_into()?)?,
        Some(vec![0, 1, 2, 3].into())
    );
    assert_eq!(store.get(&"a/c".try_into()?)?, Some(vec![0].into()));
    assert_eq!(store.get(&"a/d/e".try_into()?)?, Some(vec![].into()));
    assert_eq!(store.get(&"i/j/k".try_into()?)?, Some(vec![0, 1].into()));
    assert!(store.exists(&"a/d/e".try_into()?)?);
    assert!(!store.exists(&"a/d".try_into()?)?);

    Ok(())
}

/// List the store and check the data matches the expected values after [`store_write`].
pub fn store_list<T: ListableStorageTraits + ?Sized>(store: &T) -> Result<(), Box<dyn Error>> {
    assert_eq!(
        store.list()?,
        &[
            "a/b".try_into()?,
            "a/c".try_into()?,
            "a/d/e".try_into()?,
            "a/f/g".try_into()?,
            "a/f/h".try_into()?,
            "i/j/k".try_into()?
        ]
    );

    assert_eq!(store.list_prefix(&"".try_into()?)?, store.list()?);

    assert_eq!(
        store.list_prefix(&"a/".try_into()?)?,
        &[
            "a/b".try_into()?,
            "a/c".try_into()?,
            "a/d/e".try_into()?,
            "a/f/g".try_into()?,
            "a/f/h".try_into()?
        ]
    );
    assert_eq!(
        store.list_prefix(&"a/f/".try_into()?)?,
        &["a/f/g".try_into()?, "a/f/h".try_into()?]
    );
    assert_eq!(
        store.list_prefix(&"i/".try_into()?)?,
        &["i/j/k".try_into()?]
    );
    assert!(store.list_prefix(&"notfound/".try_into()?)?.is_empty());

    Ok(())
}
