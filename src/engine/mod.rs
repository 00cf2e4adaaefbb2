// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure net-worth engine. Every function here works on already-loaded
//! snapshots and never touches the database.

pub mod aggregate;
pub mod forecast;
pub mod income;
pub mod progress;
pub mod status;
pub mod trend;
