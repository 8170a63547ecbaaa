//! Core types for tensor shapes, element types, constants, and attributes.

/// Element type of a tensor edge.
///
/// Quantized types carry their storage properties so passes can introspect
/// signedness and storage width without a separate quantization descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    F32,
    I32,
    I64,
    U8,
    Bool,
    /// Quantized 8-bit, signed storage.
    QI8,
    /// Quantized 8-bit, unsigned storage.
    QU8,
}

impl DataType {
    /// Size of this data type in bytes.
    pub fn size(&self) -> usize {
        match self {
            DataType::F32 | DataType::I32 => 4,
            DataType::I64 => 8,
            DataType::U8 | DataType::Bool => 1,
            DataType::QI8 | DataType::QU8 => 1,
        }
    }

    /// Whether this is a quantized type.
    pub fn is_quantized(&self) -> bool {
        matches!(self, DataType::QI8 | DataType::QU8)
    }

    /// Whether the storage representation is signed.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            DataType::F32 | DataType::I32 | DataType::I64 | DataType::QI8
        )
    }

    /// Storage width in bits.
    pub fn storage_bits(&self) -> usize {
        self.size() * 8
    }
}

/// Tensor shape.
///
/// Shapes are either fully static or not yet known. Unknown shapes may exist
/// during graph construction but decline every shape-dependent rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorShape {
    /// All dimensions are known at compile time.
    Static(Vec<usize>),

    /// Shape has not been determined.
    Unknown,
}

impl TensorShape {
    /// Check if the shape is fully static.
    pub fn is_static(&self) -> bool {
        matches!(self, TensorShape::Static(_))
    }

    /// Get static dimensions if available.
    pub fn as_static(&self) -> Option<&[usize]> {
        match self {
            TensorShape::Static(dims) => Some(dims),
            TensorShape::Unknown => None,
        }
    }

    /// Number of dimensions, if known.
    pub fn ndim(&self) -> Option<usize> {
        match self {
            TensorShape::Static(dims) => Some(dims.len()),
            TensorShape::Unknown => None,
        }
    }
}

/// Raw tensor data for compile-time constants.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
}

impl TensorData {
    /// Get the number of elements in this tensor data.
    pub fn len(&self) -> usize {
        match self {
            TensorData::I32(v) => v.len(),
            TensorData::I64(v) => v.len(),
            TensorData::F32(v) => v.len(),
        }
    }

    /// Check if this tensor data is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Try to get as i32 slice.
    pub fn as_i32(&self) -> Option<&[i32]> {
        match self {
            TensorData::I32(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as i64 slice.
    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            TensorData::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as f32 slice.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            TensorData::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Get the inferred data type from this tensor data.
    pub fn dtype(&self) -> DataType {
        match self {
            TensorData::I32(_) => DataType::I32,
            TensorData::I64(_) => DataType::I64,
            TensorData::F32(_) => DataType::F32,
        }
    }
}

/// A tensor value known at compile time.
///
/// Small index-like tensors only (slice bounds, strides, axes). Weight data
/// never needs to be materialized for the rewrites in this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorValue {
    /// The raw tensor data.
    pub data: TensorData,

    /// The shape of the tensor (dimensions).
    pub shape: Vec<usize>,

    /// The data type of the tensor.
    pub dtype: DataType,
}

impl TensorValue {
    /// Create a new TensorValue with data, shape, and dtype.
    ///
    /// # Panics
    ///
    /// Panics if the data length doesn't match the shape product.
    pub fn new(data: TensorData, shape: Vec<usize>, dtype: DataType) -> Self {
        let expected_len: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            expected_len,
            "Data length {} doesn't match shape {:?} (product = {})",
            data.len(),
            shape,
            expected_len
        );
        assert_eq!(
            data.dtype(),
            dtype,
            "Data type {:?} doesn't match declared dtype {:?}",
            data.dtype(),
            dtype
        );
        Self { data, shape, dtype }
    }

    /// Create a rank-1 i32 vector value.
    pub fn vec_i32(values: Vec<i32>) -> Self {
        let len = values.len();
        Self::new(TensorData::I32(values), vec![len], DataType::I32)
    }

    /// Get the number of elements in this tensor value.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if this tensor value is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Try to get as i32 slice.
    pub fn as_i32(&self) -> Option<&[i32]> {
        self.data.as_i32()
    }
}

/// An attribute value attached to an operation node.
///
/// Attributes double as idempotence labels: a rewrite rule marks the nodes it
/// creates with a unit attribute so it never matches its own output again.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Float(f32),
    Int(i64),
    String(String),
    Ints(Vec<i64>),
    /// Marker with no payload, used for rewrite labels.
    Unit,
}

impl AttributeValue {
    /// Try to get as i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(v) => Some(v),
            _ => None,
        }
    }
}
