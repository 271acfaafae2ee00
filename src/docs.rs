// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Documentation and token format

#![allow(rustdoc::invalid_rust_codeblocks)] // Do not interpret code blocks, e.g. shell examples.
#![doc = include_str!("../README.md")]
