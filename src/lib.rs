// This file is part of the terraform-provider-jamfpro project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Terraform provider for Jamf Pro packages and policies.
//!
//! The HTTP layer is left to an implementation of [`Client`]; this crate maps
//! Terraform state onto API records and back.

pub mod attributes;
pub mod client;
pub mod error;
pub mod flatten;
mod jamfpro_provider;
pub mod package;
pub mod policy;
mod utils;

pub use attributes::{AttrValue, AttributeBag};
pub use client::{Client, ClientConfig};
pub use error::{StateCommitError, ValidationError};
pub use jamfpro_provider::JamfProProvider;
