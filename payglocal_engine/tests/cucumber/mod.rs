mod envelope_world;
mod steps;

pub use envelope_world::EnvelopeWorld;
