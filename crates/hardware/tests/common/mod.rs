//! Shared test infrastructure for simulator tests.
