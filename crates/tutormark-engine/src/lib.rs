pub mod rendering;
pub mod segmenting;
pub mod typeset;

// Re-export key types for easier usage
pub use rendering::{
    ColorScheme, DiagnosticSink, FailureMarker, LogSink, NullSink, Palette, RenderNode,
    SegmentRenderer,
};
pub use segmenting::{
    Segment, SegmentKind, Segmenter, SegmenterOptions, Span, gap_before, normalize, segment,
};
pub use typeset::{MathMode, Typeset, TypesetError, Typesetter, UnicodeTypesetter};
