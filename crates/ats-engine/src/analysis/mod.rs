// Scoring pipeline components. Each analyzer is a pure function over
// normalized documents; the aggregator combines their outputs.

pub mod experience;
pub mod format;
pub mod keywords;
pub mod semantic;
