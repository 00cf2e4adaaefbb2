// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod snapshots;
pub mod forecast;
pub mod goals;
pub mod income;
pub mod doctor;
