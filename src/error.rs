//! Typed failures for every pipeline stage.

use thiserror::Error;

/// Why the finder-pattern geometry was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryFault {
    /// The locator needs exactly three markers
    #[error("expected 3 finder candidates, found {0}")]
    CandidateCount(usize),
    /// A candidate rectangle is not square within tolerance
    #[error("finder candidate {0} is not square")]
    NotSquare(usize),
    /// The three candidates differ in size
    #[error("finder candidates are not congruent")]
    Incongruent,
    /// Pairwise marker angles are not multiples of 90 degrees
    #[error("finder candidates disagree in rotation ({0:.1} degrees apart)")]
    AngleMismatch(f32),
    /// Marker centers do not form a right isosceles triangle
    #[error("finder centers do not form a right isosceles triangle")]
    NotRightIsosceles,
    /// Module pitch or module count could not be derived
    #[error("cannot derive module grid (pitch {pitch:.2}px, {modules:.2} modules)")]
    ModuleGrid {
        /// Module pitch in pixels
        pitch: f32,
        /// Raw module count before snapping to a valid size
        modules: f32,
    },
}

/// Why the zig-zag walk could not produce the codeword stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalFault {
    /// The path ran past column 0 before the stream was complete
    #[error("path exhausted after {extracted} of {expected} codewords")]
    Exhausted {
        /// Codewords required by the capacity table
        expected: usize,
        /// Codewords read before the path ended
        extracted: usize,
    },
    /// A function module sits where the path expects a data bit
    #[error("function module at ({x}, {y}) on the data path")]
    FunctionModule {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },
    /// The codeword stream length disagrees with the capacity table
    #[error("codeword stream has {actual} bytes, capacity table expects {expected}")]
    Length {
        /// Codewords required by the capacity table
        expected: usize,
        /// Codewords supplied
        actual: usize,
    },
}

/// Reed-Solomon block failure detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RsError {
    /// Locator degree exceeds the correction capacity
    #[error("error locator degree {degree} exceeds capacity {capacity}")]
    TooManyErrors {
        /// Degree of the error locator polynomial
        degree: usize,
        /// Correction capacity t
        capacity: usize,
    },
    /// Chien search found a different number of roots than the locator degree
    #[error("locator has degree {degree} but {roots} roots inside the block")]
    LocatorMismatch {
        /// Degree of the error locator polynomial
        degree: usize,
        /// Roots found at valid positions
        roots: usize,
    },
    /// Forney evaluation hit a zero derivative
    #[error("error evaluator derivative vanished")]
    DegenerateLocator,
    /// Syndromes are still non-zero after correction
    #[error("syndromes remain after correction")]
    ResidualSyndrome,
}

/// Error type returned by every decode entry point
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The raster has zero width or height
    #[error("image is empty")]
    EmptyImage,
    /// Finder patterns missing, extra, or badly shaped
    #[error("finder geometry not found: {0}")]
    GeometryNotFound(#[from] GeometryFault),
    /// A provisional or decoded version outside 1..=40
    #[error("version {0} out of range")]
    VersionOutOfRange(i32),
    /// Both version-information copies failed the distance bound
    #[error("version information undecodable")]
    VersionUndecodable,
    /// Both format-information copies failed the distance bound
    #[error("format information undecodable")]
    FormatUndecodable,
    /// The zig-zag walk failed
    #[error("module traversal failed: {0}")]
    ModuleTraversal(#[from] TraversalFault),
    /// A Reed-Solomon block holds more errors than it can correct
    #[error("block {block} uncorrectable: {cause}")]
    BlockUncorrectable {
        /// Block index in deinterleaved order
        block: usize,
        /// Decoder failure detail
        cause: RsError,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DecodeError>;
