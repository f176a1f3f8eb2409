use std::{error::Error, sync::Arc};

use zarrs_lite::{
    array::{ArrayBuilder, DataType},
    group::{Group, GroupCreateError},
    metadata::GroupMetadata,
    node::{Node, NodeCreateError},
    storage::{
        store::{FilesystemStore, MemoryStore},
        WritableStorageTraits,
    },
};

#[test]
fn hierarchy_list_children() -> Result<(), Box<dyn Error>> {
    let store = Arc::new(MemoryStore::new());
    let root = Group::create(store.clone(), "", GroupMetadata::default())?;
    let level1 = Group::create(store.clone(), "level1", GroupMetadata::default())?;
    let array = ArrayBuilder::new(vec![10, 20], DataType::Int32, vec![5, 5], 0i64.into())
        .build(store.clone(), "level1/data")?;
    array.store_metadata()?;
    array.write_chunk(&[1, 3], &[1i32; 25])?;

    assert_eq!(root.list_children()?, vec!["level1"]);
    assert_eq!(level1.list_children()?, vec!["data"]);

    let level1 = Group::open(store.clone(), "/level1")?;
    assert_eq!(level1.list_children()?, vec!["data"]);
    assert!(Node::open(store, "/level1/data")?.is_array());
    Ok(())
}

#[test]
fn hierarchy_tree() -> Result<(), Box<dyn Error>> {
    let path = tempfile::TempDir::new()?;
    let store = Arc::new(FilesystemStore::new(path.path())?);
    Group::create(store.clone(), "/", GroupMetadata::default())?;
    Group::create(store.clone(), "/a", GroupMetadata::default())?;
    for name in ["/a/baz", "/a/foo"] {
        ArrayBuilder::new(vec![10000, 1000], DataType::Float64, vec![1000, 100], 0i64.into())
            .build(store.clone(), name)?
            .store_metadata()?;
    }
    Group::create(store.clone(), "/b", GroupMetadata::default())?;

    let node = Node::open(store, "/")?;
    assert_eq!(
        node.hierarchy_tree()?,
        "/
  a
    baz [10000, 1000] float64
    foo [10000, 1000] float64
  b
"
    );
    Ok(())
}

#[test]
fn hierarchy_open_missing() {
    let store = Arc::new(MemoryStore::new());
    assert!(matches!(
        Group::open(store, "/missing"),
        Err(GroupCreateError::MissingMetadata(_))
    ));
}

#[test]
fn hierarchy_open_malformed_array() -> Result<(), Box<dyn Error>> {
    let store = Arc::new(MemoryStore::new());
    // no node_type, and a shape that is not a valid array shape
    let document = r#"{"zarr_format":3,"shape":[-10],"data_type":"int32","chunk_grid":{"name":"regular","configuration":{"chunk_shape":[5]}},"chunk_key_encoding":{"name":"default","configuration":{"separator":"/"}},"fill_value":0,"codecs":[{"name":"bytes","configuration":{"endian":"little"}}]}"#;
    store.set(&"a/zarr.json".try_into()?, document.as_bytes().to_vec().into())?;
    assert!(matches!(
        Node::open(store.clone(), "/a"),
        Err(NodeCreateError::MetadataDeserializationError(_))
    ));
    assert!(matches!(
        Group::open(store, "/a"),
        Err(GroupCreateError::MetadataDeserializationError(_))
    ));
    Ok(())
}

#[test]
fn hierarchy_open_array_as_group() -> Result<(), Box<dyn Error>> {
    let store = Arc::new(MemoryStore::new());
    let document = r#"{"shape":[10],"data_type":"int32","chunk_grid":{"name":"regular","configuration":{"chunk_shape":[5]}},"chunk_key_encoding":{"name":"default","configuration":{"separator":"/"}},"fill_value":0,"codecs":[{"name":"bytes","configuration":{"endian":"little"}}]}"#;
    store.set(&"a/zarr.json".try_into()?, document.as_bytes().to_vec().into())?;
    assert!(Node::open(store.clone(), "/a")?.is_array());
    assert!(matches!(
        Group::open(store, "/a"),
        Err(GroupCreateError::InvalidNodeType(node_type)) if node_type == "array"
    ));
    Ok(())
}
