// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

pub mod feature;
pub mod search;
pub mod state;
