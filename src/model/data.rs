//! Input and output image series.

use serde::{Deserialize, Serialize};

use super::{
    Decimal, DecimalSetting, FlaggedSelector, ImageIndex, IntSetting, Selector, Unsettable,
};
use crate::codec::xml_node;

/// Source projection files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputData {
    /// Folder holding the projections
    pub folder: Option<String>,

    /// File name prefix
    pub prefix: Option<String>,

    /// File name suffix
    pub suffix: Option<String>,

    /// File extension
    pub extension: Option<String>,

    /// Number of digits in the file index
    pub nod: Option<IntSetting>,

    /// Upper memory bound
    pub memory_size_max: Option<DecimalSetting>,

    /// Lower memory bound
    pub memory_size_min: Option<IntSetting>,

    /// Projection orientation
    pub orientation: Option<FlaggedSelector>,

    /// First file index
    pub file_first: Unsettable<i32>,

    /// Last file index
    pub file_last: Unsettable<i32>,

    /// File index increment
    pub file_step: Unsettable<i32>,

    /// First projection to reconstruct
    pub image_first: Option<ImageIndex>,

    /// Last projection to reconstruct
    pub image_last: Option<ImageIndex>,

    /// Projection increment
    pub image_step: Option<ImageIndex>,

    /// Layout of raw binary projections
    pub raw: Option<RawFormat>,

    /// Index of the first image inside a multi-image file
    pub first_image_index: Option<IntSetting>,

    /// Images stored per file
    pub images_per_file: Unsettable<i32>,

    /// Value clipping mode
    pub restrictions: Option<Selector>,

    /// Lower clipping bound
    pub value_min: Option<Decimal>,

    /// Upper clipping bound
    pub value_max: Option<Decimal>,

    /// Input file format
    pub ty: Option<Selector>,

    /// Projection shape
    pub shape: Option<Selector>,

    /// Parameter of the selected shape
    pub pixel_param: Option<Decimal>,
}

xml_node! {
    InputData => "InputData_._type", create = create_input_data {
        elements {
            scalar folder = "Folder",
            scalar prefix = "Prefix",
            scalar suffix = "Suffix",
            scalar extension = "Extension",
            node nod = "NOD",
            node memory_size_max = "MemorySizeMax",
            node memory_size_min = "MemorySizeMin",
            node orientation = "Orientation",
            scalar file_first = "FileFirst",
            scalar file_last = "FileLast",
            scalar file_step = "FileStep",
            node image_first = "ImageFirst",
            node image_last = "ImageLast",
            node image_step = "ImageStep",
            node raw = "Raw",
            node first_image_index = "FirstImageIndex",
            scalar images_per_file = "ImagesPerFile",
            node restrictions = "Restrictions",
            scalar value_min = "ValueMin",
            scalar value_max = "ValueMax",
            node ty = "Type",
            node shape = "Shape",
            scalar pixel_param = "PixelParam",
        }
    }
}

/// Binary layout of raw projection files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFormat {
    /// Whether the input is raw at all
    pub ty: Option<Selector>,

    /// Bits per pixel
    pub bits: Unsettable<i32>,

    /// Header bytes before the first image
    pub offset: Option<IntSetting>,

    /// Endianness
    pub byte_order: Option<Selector>,

    /// Image width in pixels
    pub xlen: Unsettable<i32>,

    /// Image height in pixels
    pub ylen: Unsettable<i32>,

    /// Images per file
    pub zlen: Unsettable<i32>,

    /// Bytes between consecutive images
    pub gap: Option<IntSetting>,

    /// Processing flag (required)
    pub done: Option<String>,
}

xml_node! {
    RawFormat => "Raw_._type", create = create_raw_format {
        attributes { Required done = "done" }
        elements {
            node ty = "Type",
            scalar bits = "Bits",
            node offset = "Offset",
            node byte_order = "ByteOrder",
            scalar xlen = "Xlen",
            scalar ylen = "Ylen",
            scalar zlen = "Zlen",
            node gap = "Gap",
        }
    }
}

/// Reconstructed slice files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputData {
    /// Output file format
    pub ty: Option<Selector>,

    /// Output state
    pub state: Option<Selector>,

    /// Folder receiving the slices
    pub folder: Option<String>,

    /// File name prefix
    pub prefix: Option<String>,

    /// File name suffix
    pub suffix: Option<String>,

    /// File extension
    pub extension: Option<String>,

    /// Number of digits in the file index
    pub nod: Unsettable<i32>,

    /// Index of the first written file
    pub file_first: Unsettable<i32>,

    /// File index increment
    pub file_step: Unsettable<i32>,

    /// Pixel type of the written slices
    pub bits_type: Option<Selector>,

    /// Bits per pixel
    pub bits: Unsettable<i32>,

    /// Value clipping mode
    pub restrictions: Option<Selector>,

    /// Lower clipping bound
    pub value_min: Option<Decimal>,

    /// Upper clipping bound
    pub value_max: Option<Decimal>,

    /// Output slice shape
    pub shape: Option<FlaggedSelector>,
}

xml_node! {
    OutputData => "OutputData_._type", create = create_output_data {
        elements {
            node ty = "Type",
            node state = "State",
            scalar folder = "Folder",
            scalar prefix = "Prefix",
            scalar suffix = "Suffix",
            scalar extension = "Extension",
            scalar nod = "NOD",
            scalar file_first = "FileFirst",
            scalar file_step = "FileStep",
            node bits_type = "BitsType",
            scalar bits = "Bits",
            node restrictions = "Restrictions",
            scalar value_min = "ValueMin",
            scalar value_max = "ValueMax",
            node shape = "Shape",
        }
    }
}
