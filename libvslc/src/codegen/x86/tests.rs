// Copyright 2025-2026 Neil Henderson

mod operand_tests;
