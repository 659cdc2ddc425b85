use devpulse_aggregate::percent_delta;

fn report(current: u64, previous: u64, json: bool) -> String {
    let delta = percent_delta(current, previous);
    if json {
        serde_json::json!({ "current": current, "previous": previous, "delta": delta }).to_string()
    } else {
        format!("{delta:+}%")
    }
}

/// `devpulse delta <current> <previous>`
pub fn execute(current: u64, previous: u64, json: bool) -> anyhow::Result<()> {
    println!("{}", report(current, previous, json));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_is_signed_percent() {
        assert_eq!(report(300, 150, false), "+100%");
        assert_eq!(report(1, 3, false), "-67%");
        assert_eq!(report(7, 0, false), "+0%");
    }

    #[test]
    fn json_carries_inputs() {
        let value: serde_json::Value = serde_json::from_str(&report(9, 8, true)).unwrap();
        assert_eq!(value, json!({"current": 9, "previous": 8, "delta": 13}));
    }
}
