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

use thiserror::Error;

/// Error raised while building an API request from resource attributes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{field}` is required and cannot be empty")]
    MissingRequired { field: &'static str },

    #[error("`{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Name of the attribute the error is about
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingRequired { field } => field,
            ValidationError::WrongType { field, .. } => field,
        }
    }
}

/// Error raised when a flattened attribute bag does not fit the state schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateCommitError {
    #[error("`{path}` has no attribute or block named `{key}`")]
    UnknownKey { path: String, key: String },

    #[error("`{path}` must be a {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },
}
