// SPDX-License-Identifier: GPL-3.0-or-later

pub mod aggregate;
pub mod config;
pub mod locale;
pub mod records;
pub mod report;
pub mod source;
