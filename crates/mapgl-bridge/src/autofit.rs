//! Auto-fit: frame the camera around every registered object.

use mapgl_protocol::{
    Command, FitBoundsOptions, FitBoundsParams, LngLat, LngLatBounds, Padding, PartialPadding,
};
use serde::{Deserialize, Serialize};

/// Padding used when auto-fit is switched on with a plain `true`.
pub const DEFAULT_FIT_PADDING: f64 = 100.0;

/// The `autoFitBounds` setting: a flag, or the padding to fit with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoFitSetting {
    Enabled(bool),
    Padding(PartialPadding),
}

impl Default for AutoFitSetting {
    fn default() -> Self {
        AutoFitSetting::Enabled(false)
    }
}

impl From<bool> for AutoFitSetting {
    fn from(enabled: bool) -> Self {
        AutoFitSetting::Enabled(enabled)
    }
}

impl From<PartialPadding> for AutoFitSetting {
    fn from(padding: PartialPadding) -> Self {
        AutoFitSetting::Padding(padding)
    }
}

impl AutoFitSetting {
    /// Fit padding, or `None` when auto-fit is off.
    pub fn padding(&self) -> Option<PartialPadding> {
        match self {
            AutoFitSetting::Enabled(true) => Some(Padding::uniform(DEFAULT_FIT_PADDING).into()),
            AutoFitSetting::Enabled(false) => None,
            AutoFitSetting::Padding(p) => Some(*p),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.padding().is_some()
    }

    /// The `fitBounds` command framing `points`, if auto-fit is on and any
    /// point survives filtering.
    pub fn fit_command<'a, I>(&self, points: I) -> Option<Command>
    where
        I: IntoIterator<Item = &'a LngLat>,
    {
        let padding = self.padding()?;
        let bounds = union_bounds(points)?;
        Some(Command::FitBounds(FitBoundsParams {
            bounds,
            options: Some(FitBoundsOptions {
                padding: Some(padding),
                ..Default::default()
            }),
        }))
    }
}

/// Whether a point may take part in auto-fit.
///
/// A zero or NaN component marks a placeholder coordinate; such points are
/// skipped. This also drops real points on the equator or prime meridian.
pub fn is_fit_candidate(point: &LngLat) -> bool {
    point.iter().all(|c| *c != 0.0 && !c.is_nan())
}

/// Smallest box containing every candidate point.
pub fn union_bounds<'a, I>(points: I) -> Option<LngLatBounds>
where
    I: IntoIterator<Item = &'a LngLat>,
{
    points
        .into_iter()
        .filter(|p| is_fit_candidate(p))
        .fold(None, |acc: Option<LngLatBounds>, [lng, lat]| {
            Some(match acc {
                None => LngLatBounds {
                    south_west: [*lng, *lat],
                    north_east: [*lng, *lat],
                },
                Some(b) => LngLatBounds {
                    south_west: [b.south_west[0].min(*lng), b.south_west[1].min(*lat)],
                    north_east: [b.north_east[0].max(*lng), b.north_east[1].max(*lat)],
                },
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn union_of_two_points() {
        let pts = [[10.0, 20.0], [30.0, 5.0]];
        assert_eq!(
            union_bounds(&pts),
            Some(LngLatBounds {
                south_west: [10.0, 5.0],
                north_east: [30.0, 20.0],
            })
        );
    }

    #[test]
    fn zero_and_nan_points_are_skipped() {
        let pts = [[0.0, 0.0], [f64::NAN, 3.0], [0.0, 5.0], [2.0, 3.0]];
        assert_eq!(
            union_bounds(&pts),
            Some(LngLatBounds {
                south_west: [2.0, 3.0],
                north_east: [2.0, 3.0],
            })
        );
        assert_eq!(union_bounds(&[[0.0, 0.0]]), None);
    }

    #[test]
    fn true_means_uniform_default_padding() {
        let cmd = AutoFitSetting::Enabled(true)
            .fit_command(&[[1.0, 1.0]])
            .unwrap();
        assert_eq!(
            serde_json::to_value(&cmd).unwrap()["params"]["options"],
            json!({"padding": {"top": 100.0, "right": 100.0, "bottom": 100.0, "left": 100.0}})
        );
    }

    #[test]
    fn partial_padding_is_forwarded_as_given() {
        let setting: AutoFitSetting = serde_json::from_value(json!({"top": 40})).unwrap();
        let cmd = setting.fit_command(&[[1.0, 1.0]]).unwrap();
        assert_eq!(
            serde_json::to_value(&cmd).unwrap()["params"]["options"],
            json!({"padding": {"top": 40.0}})
        );
    }

    #[test]
    fn disabled_never_fits() {
        assert_eq!(AutoFitSetting::default().fit_command(&[[1.0, 1.0]]), None);
        let setting: AutoFitSetting = serde_json::from_value(json!(false)).unwrap();
        assert!(!setting.is_enabled());
    }
}
