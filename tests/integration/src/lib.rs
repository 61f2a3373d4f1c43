//! Intentionally empty. Integration tests live in `tests/`.
