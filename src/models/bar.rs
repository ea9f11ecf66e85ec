use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// One price bar of a cached series.
///
/// Field order matches the cache file column order:
/// `date,open,high,low,close,volume,symbol,sma20,rsi`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar timestamp; midnight for daily and coarser timeframes
    #[serde(
        serialize_with = "serialize_bar_date",
        deserialize_with = "deserialize_bar_date"
    )]
    pub date: DateTime<Utc>,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume
    pub volume: u64,

    /// Symbol the bar belongs to
    pub symbol: String,

    /// 20-period simple moving average; empty until 20 periods exist
    pub sma20: Option<f64>,

    /// 14-period relative strength index, 50 where undefined
    pub rsi: Option<f64>,
}

impl PriceBar {
    /// Create a bar without indicator columns filled in.
    pub fn new(
        date: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        symbol: String,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            symbol,
            sma20: None,
            rsi: None,
        }
    }
}

/// Serialize midnight timestamps as a bare date, the way daily series
/// are stored, and keep the full timestamp for intraday bars.
fn serialize_bar_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let time = date.time();
    let formatted = if time.hour() == 0 && time.minute() == 0 && time.second() == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M:%S").to_string()
    };
    serializer.serialize_str(&formatted)
}

fn deserialize_bar_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar_at(date: DateTime<Utc>) -> PriceBar {
        PriceBar::new(date, 1.0, 2.0, 0.5, 1.5, 1000, "TEST".to_string())
    }

    #[test]
    fn test_midnight_serializes_as_bare_date() {
        let bar = bar_at(Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&bar).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.contains("2024-03-04,1.0"), "got: {}", out);
    }

    #[test]
    fn test_intraday_keeps_full_timestamp() {
        let bar = bar_at(Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap());
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&bar).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.contains("2024-03-04 14:30:00"), "got: {}", out);
    }

    #[test]
    fn test_date_parses_both_forms() {
        let data = "date,open,high,low,close,volume,symbol,sma20,rsi\n\
                    2024-03-04,1.0,2.0,0.5,1.5,1000,TEST,,50.0\n\
                    2024-03-04 14:30:00,1.0,2.0,0.5,1.5,1000,TEST,1.2,50.0\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let bars: Vec<PriceBar> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(bars.len(), 2);
        assert_eq!(
            bars[0].date,
            Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
        );
        assert_eq!(bars[0].sma20, None);
        assert_eq!(
            bars[1].date,
            Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap()
        );
        assert_eq!(bars[1].sma20, Some(1.2));
    }
}
