// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

/// Generate a pool of client identities for testing.
pub fn generate_identities(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = (i >> 16) & 0xFF;
            let b = (i >> 8) & 0xFF;
            let c = i & 0xFF;
            format!("10.{a}.{b}.{c}")
        })
        .collect()
}

/// A realistic browser user-agent.
pub fn browser_user_agent() -> &'static str {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36"
}

/// Automation user-agents that should be turned away at the gate.
pub fn bot_user_agents() -> Vec<&'static str> {
    vec![
        "curl/8.4.0",
        "python-requests/2.31.0",
        "Scrapy/2.11 (+https://scrapy.org)",
        "Wget/1.21.3",
        "Googlebot/2.1 (+http://www.google.com/bot.html)",
        "Apache-HttpClient/4.5.14",
        "libwww-perl/6.72",
    ]
}

/// A well-formed submission body.
pub fn valid_payload(i: usize) -> String {
    serde_json::json!({
        "name": "Jane Doe",
        "email": format!("jane.doe{i}@example.com"),
        "subject": "Project inquiry",
        "message": format!("Hello, I would like to discuss project number {i} with you."),
    })
    .to_string()
}

/// A well-formed submission with the honeypot field filled in.
pub fn honeypot_payload(i: usize) -> String {
    serde_json::json!({
        "name": "Jane Doe",
        "email": format!("jane.doe{i}@example.com"),
        "subject": "Project inquiry",
        "message": format!("Hello, I would like to discuss project number {i} with you."),
        "website": "http://spam.example/landing",
    })
    .to_string()
}

/// A submission that trips the spam-keyword screen.
pub fn spam_payload(i: usize) -> String {
    let hooks = [
        "Congratulations, you are our lottery winner!",
        "Act now, this urgent casino offer expires today.",
        "You are the lucky winner of our weekly lottery draw.",
    ];
    serde_json::json!({
        "name": "Jane Doe",
        "email": format!("promo{i}@example.com"),
        "subject": "Important notice for you",
        "message": hooks[i % hooks.len()],
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_identities() {
        let identities = generate_identities(256);
        assert_eq!(identities.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = identities.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_payloads_are_json_objects() {
        for body in [valid_payload(1), honeypot_payload(2), spam_payload(3)] {
            let value: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert!(value.is_object());
        }
    }
}
