//! A command line tool for creating and inspecting `zarrs_lite` hierarchies on a filesystem.

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use zarrs_lite::{
    array::{Array, ArrayBuilder, DataType},
    group::Group,
    metadata::{FillValueMetadata, GroupMetadata, Metadata},
    node::Node,
    storage::store::FilesystemStore,
};

/// Create and inspect Zarr V3 groups and arrays in a directory.
#[derive(Parser, Debug)]
#[command(name = "zarrs_lite", version)]
struct Cli {
    /// The directory holding the hierarchy
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a group
    CreateGroup {
        /// Path of the group in the hierarchy
        path: String,
    },
    /// Create an array
    CreateArray {
        /// Path of the array in the hierarchy
        path: String,
        /// Array shape, e.g. 10,20
        #[arg(long, value_delimiter = ',', required = true)]
        shape: Vec<u64>,
        /// Regular chunk shape, e.g. 5,5
        #[arg(long, value_delimiter = ',', required = true)]
        chunk_shape: Vec<u64>,
        /// Data type, e.g. int32
        #[arg(long)]
        dtype: String,
        /// Fill value, e.g. 0, 1.5, NaN, true
        #[arg(long, default_value = "null")]
        fill_value: String,
        /// Bytes to bytes codecs applied after the bytes codec, in order, e.g. --codec gzip --codec crc32c
        #[arg(long = "codec")]
        codecs: Vec<String>,
    },
    /// Print the hierarchy below a node
    List {
        /// Path of the node
        #[arg(default_value = "/")]
        path: String,
    },
    /// Print the metadata of a node
    Info {
        /// Path of the node
        path: String,
    },
    /// Print the elements of a chunk
    ReadChunk {
        /// Path of the array
        path: String,
        /// Chunk grid indices, e.g. 0,1
        #[arg(long, value_delimiter = ',', required = true)]
        index: Vec<u64>,
    },
    /// Fill a chunk with a value
    WriteChunk {
        /// Path of the array
        path: String,
        /// Chunk grid indices, e.g. 0,1
        #[arg(long, value_delimiter = ',', required = true)]
        index: Vec<u64>,
        /// The value of every element of the chunk
        #[arg(long)]
        value: String,
    },
}

/// Run `$body` with `$t` aliased to the element type of `$data_type`.
macro_rules! with_element_type {
    ($data_type:expr, $t:ident, $body:block) => {
        match $data_type {
            DataType::Bool => { type $t = bool; $body }
            DataType::Int8 => { type $t = i8; $body }
            DataType::Int16 => { type $t = i16; $body }
            DataType::Int32 => { type $t = i32; $body }
            DataType::Int64 => { type $t = i64; $body }
            DataType::UInt8 => { type $t = u8; $body }
            DataType::UInt16 => { type $t = u16; $body }
            DataType::UInt32 => { type $t = u32; $body }
            DataType::UInt64 => { type $t = u64; $body }
            DataType::Float32 => { type $t = f32; $body }
            DataType::Float64 => { type $t = f64; $body }
            data_type => bail!("data type {data_type} is not supported by the command line tool"),
        }
    };
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = Arc::new(
        FilesystemStore::new(&cli.store)
            .with_context(|| format!("cannot open store {}", cli.store.display()))?,
    );

    match cli.command {
        Command::CreateGroup { path } => {
            Group::create(store, &path, GroupMetadata::default())?;
        }
        Command::CreateArray {
            path,
            shape,
            chunk_shape,
            dtype,
            fill_value,
            codecs,
        } => {
            let data_type = DataType::from_name(&dtype)?;
            let mut metadata = ArrayBuilder::new(
                shape,
                data_type,
                chunk_shape,
                FillValueMetadata::parse(&fill_value),
            )
            .build_metadata();
            metadata
                .codecs
                .extend(codecs.iter().map(|name| Metadata::new(name)));
            Array::create(store, &path, metadata)?;
        }
        Command::List { path } => {
            print!("{}", Node::open(store, &path)?.hierarchy_tree()?);
        }
        Command::Info { path } => {
            let json = match Node::open(store, &path)? {
                Node::Array(array) => serde_json::to_string_pretty(array.metadata())?,
                Node::Group(group) => serde_json::to_string_pretty(group.metadata())?,
            };
            println!("{json}");
        }
        Command::ReadChunk { path, index } => {
            let array = Array::open(store, &path)?;
            with_element_type!(*array.data_type(), T, {
                let elements = array.read_chunk::<T>(&index)?;
                println!("{}", elements.iter().join(","));
            });
        }
        Command::WriteChunk { path, index, value } => {
            let array = Array::open(store, &path)?;
            let num_elements = usize::try_from(array.chunk_shape(&index)?.iter().product::<u64>())?;
            with_element_type!(*array.data_type(), T, {
                let value: T = value
                    .parse()
                    .with_context(|| format!("invalid value {value} for {}", array.data_type()))?;
                array.write_chunk(&index, &vec![value; num_elements])?;
            });
        }
    }
    Ok(())
}
