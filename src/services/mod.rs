// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Renkulist Contributors

pub mod codec;
pub mod executor;
pub mod history;
pub mod logging;
pub mod store;
pub mod upstream;
