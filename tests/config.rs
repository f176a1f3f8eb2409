//! Global configuration changes, kept in their own test binary so no other test observes them.

use std::{error::Error, sync::Arc};

use zarrs_lite::{
    array::{ArrayBuilder, DataType},
    config::global_config_mut,
    storage::{store::MemoryStore, ReadableStorageTraits, WritableStorageTraits},
};

#[cfg(feature = "crc32c")]
#[test]
fn config_validate_checksums_and_pretty() -> Result<(), Box<dyn Error>> {
    use zarrs_lite::array::codec::Crc32cCodec;

    let store = Arc::new(MemoryStore::new());
    let array = ArrayBuilder::new(vec![4], DataType::UInt8, vec![4], 0i64.into())
        .bytes_to_bytes_codecs(vec![Box::new(Crc32cCodec::new())])
        .build(store.clone(), "/")?;

    global_config_mut().set_metadata_pretty(false);
    array.store_metadata()?;
    let json = store.get(&"zarr.json".try_into()?)?.ok_or("missing metadata")?;
    assert!(!json.contains(&b'\n'));

    array.write_chunk(&[0], &[1u8, 2, 3, 4])?;
    let key = array.chunk_key(&[0]);
    let mut value = store.get(&key)?.ok_or("missing chunk")?.to_vec();
    value[4] ^= 1;
    store.set(&key, value.into())?;
    assert!(array.read_chunk::<u8>(&[0]).is_err());

    global_config_mut().set_validate_checksums(false);
    assert_eq!(array.read_chunk::<u8>(&[0])?, vec![1, 2, 3, 4]);
    Ok(())
}
