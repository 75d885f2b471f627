// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the global logger once.
///
/// The filter comes from `filter` if given, else `RUST_LOG`, else `info`.
pub(crate) fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match filter
            .map(str::to_owned)
            .or_else(|| std::env::var("RUST_LOG").ok())
        {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }
        builder.write_style(env_logger::WriteStyle::Auto);
        builder.init();
        log::debug!("logging initialized");
    });
}
