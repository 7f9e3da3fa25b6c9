use chartlab_core::experiment::ElapsedTime;

#[must_use]
pub fn format_elapsed(elapsed: ElapsedTime) -> String {
    format!("It took you {elapsed} seconds to answer the question!")
}
