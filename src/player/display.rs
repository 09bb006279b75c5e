/// Format seconds as `m:ss`; unknown or negative values read `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Label for an optional track duration.
pub fn duration_label(seconds: Option<f64>) -> String {
    format_time(seconds.unwrap_or(0.0))
}

/// Coarse volume indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

impl VolumeIcon {
    pub fn for_level(level: f32) -> Self {
        if level <= 0.0 {
            VolumeIcon::Muted
        } else if level < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            VolumeIcon::Muted => "🔇",
            VolumeIcon::Low => "🔉",
            VolumeIcon::High => "🔊",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(204.0), "3:24");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn format_time_handles_unknown_values() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(duration_label(None), "0:00");
        assert_eq!(duration_label(Some(178.0)), "2:58");
    }

    #[test]
    fn volume_icon_thresholds() {
        assert_eq!(VolumeIcon::for_level(0.0), VolumeIcon::Muted);
        assert_eq!(VolumeIcon::for_level(0.49), VolumeIcon::Low);
        assert_eq!(VolumeIcon::for_level(0.5), VolumeIcon::High);
        assert_eq!(VolumeIcon::for_level(1.0), VolumeIcon::High);
    }
}
