use chrono::{DateTime, Utc};
use serde::Serialize;

use super::resource::ResourceTag;

/// How a backend should interpret a record's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    /// Accumulated since `interval.start_time`; presented as a rate.
    Cumulative,
    /// Point-in-time reading; `start_time == end_time`.
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Cumulative => "CUMULATIVE",
            MetricKind::Gauge => "GAUGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeInterval {
    /// Interval for accumulated values. `end` is clamped so it never precedes `start`.
    pub fn cumulative(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start_time: start,
            end_time: end.max(start),
        }
    }

    /// Zero-width interval for an instantaneous reading.
    pub fn instant(at: DateTime<Utc>) -> Self {
        Self {
            start_time: at,
            end_time: at,
        }
    }
}

/// Wire-ready unit submitted to a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesRecord {
    /// Fully qualified metric type, e.g. `custom.googleapis.com/ci/builds`.
    pub metric_type: String,
    pub kind: MetricKind,
    pub resource: ResourceTag,
    pub value: f64,
    pub interval: TimeInterval,
}

impl TimeSeriesRecord {
    pub fn cumulative(
        metric_type: String,
        resource: ResourceTag,
        value: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            metric_type,
            kind: MetricKind::Cumulative,
            resource,
            value,
            interval: TimeInterval::cumulative(start, end),
        }
    }

    pub fn gauge(metric_type: String, resource: ResourceTag, value: f64, at: DateTime<Utc>) -> Self {
        Self {
            metric_type,
            kind: MetricKind::Gauge,
            resource,
            value,
            interval: TimeInterval::instant(at),
        }
    }
}
