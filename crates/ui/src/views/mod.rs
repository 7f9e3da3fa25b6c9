mod experiment;
mod state;

pub use experiment::ExperimentView;
pub use state::ViewError;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
