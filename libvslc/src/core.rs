// Copyright 2025-2026 Neil Henderson
//
//! The `core` module provides foundational types and functions used by the back-end stages.

mod internal_error;
