// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: URL routing command for the dashboard-shell CLI
// ABOUTME: Prints the tenant-routed URL of an endpoint with optional query parameters

use dashboard_shell::context::ShellContext;

pub fn print(shell: &ShellContext, endpoint: &str, tenant: Option<&str>, params: &[(String, String)]) {
    let url = match tenant {
        Some(key) => {
            let tenant = shell.registry().resolve_key(key);
            shell.router().build_url_with_params(
                endpoint,
                tenant.as_str(),
                params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            )
        }
        None => shell.url_for(endpoint, params),
    };
    println!("{url}");
}
