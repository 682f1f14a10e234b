//! Classification of operations by the presence of their input and output.

/// How an operation's payload slots are filled.
///
/// The mapping from `(input present, output present)` is total and has no fallback case, so
/// every consumer that re-derives a shape from the same operation sees the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationShape {
    RequestResponse,
    /// Output only.
    NoInput,
    /// Input only; completes without a payload.
    NoOutput,
    NoInputNoOutput,
}

impl OperationShape {
    pub const ALL: [OperationShape; 4] = [
        OperationShape::RequestResponse,
        OperationShape::NoInput,
        OperationShape::NoOutput,
        OperationShape::NoInputNoOutput,
    ];

    pub const fn from_presence(has_input: bool, has_output: bool) -> Self {
        match (has_input, has_output) {
            (true, true) => Self::RequestResponse,
            (false, true) => Self::NoInput,
            (true, false) => Self::NoOutput,
            (false, false) => Self::NoInputNoOutput,
        }
    }

    pub const fn has_input(self) -> bool {
        matches!(self, Self::RequestResponse | Self::NoOutput)
    }

    pub const fn has_output(self) -> bool {
        matches!(self, Self::RequestResponse | Self::NoInput)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequestResponse => "request_response",
            Self::NoInput => "no_input",
            Self::NoOutput => "no_output",
            Self::NoInputNoOutput => "no_input_no_output",
        }
    }
}

impl std::fmt::Display for OperationShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
