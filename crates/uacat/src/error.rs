// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use thiserror::Error;

use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::extension::ExtensionError;
use crate::registry::RegistryError;
use crate::variant::VariantError;

/// Any error this crate returns.
///
/// Each module has its own error type; this one exists for callers that
/// want a single `?` target.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Variant(#[from] VariantError),

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = core::result::Result<T, Error>;
