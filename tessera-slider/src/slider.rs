//! Value state for single and range sliders.
//!
//! ## Usage
//!
//! Build a [`SliderState`] from [`SliderArgs`], feed it the raw or typed
//! values produced by the gesture layer, and position the track fill and
//! handles from [`SliderState::fill_width`] and [`SliderState::fill_offset`].
use std::{fmt, sync::Arc};

use derive_setters::Setters;
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::{
    converter::{Converter, NumberFormat, NumericConverter},
    error::{ConversionError, SliderError},
    prop::CallbackWith,
};

pub use self::{
    ticks::TickMark,
    validation::{Bound, RangeViolation, check_order},
};

mod geometry;
mod ticks;
mod validation;

const DEFAULT_MIN: &str = "0";
const DEFAULT_MAX: &str = "100";
const DEFAULT_STEP: &str = "1";

/// Whether a slider has one handle or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderMode {
    /// A single `value` handle.
    #[default]
    Single,
    /// Two ordered handles, `value` strictly below `upper_value`.
    Range,
}

/// Arguments for a slider.
///
/// Every `Option` field left as `None` keeps the value the state already
/// holds, so the same args type serves for creation and for later parameter
/// passes through [`SliderState::apply`].
#[derive(Clone, Setters)]
pub struct SliderArgs<T> {
    /// Single or range slider.
    pub mode: SliderMode,
    /// Lower end of the track. Defaults to `0`.
    #[setters(strip_option)]
    pub min: Option<T>,
    /// Upper end of the track. Defaults to `100`.
    #[setters(strip_option)]
    pub max: Option<T>,
    /// Distance between stops. Defaults to `1`.
    #[setters(strip_option)]
    pub step: Option<T>,
    /// The (lower) handle value.
    #[setters(strip_option)]
    pub value: Option<T>,
    /// The upper handle value of a range slider.
    #[setters(strip_option)]
    pub upper_value: Option<T>,
    /// Disable interaction.
    pub disabled: bool,
    /// Commit values while dragging instead of on release.
    pub immediate: bool,
    /// Lay the track out vertically.
    pub vertical: bool,
    /// Show tick marks at every step.
    pub tick_marks: bool,
    /// Labels mapped to tick marks in index order.
    #[setters(into)]
    pub tick_mark_labels: Vec<String>,
    /// Show the value above the handle.
    pub value_label: bool,
    /// Called after an accepted change of `value`.
    #[setters(skip)]
    pub on_value_changed: Option<CallbackWith<Option<T>>>,
    /// Called after an accepted change of `upper_value`.
    #[setters(skip)]
    pub on_upper_value_changed: Option<CallbackWith<Option<T>>>,
}

impl<T: 'static> SliderArgs<T> {
    /// Sets the `value` change handler.
    pub fn on_value_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(Option<T>) + Send + Sync + 'static,
    {
        self.on_value_changed = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the `value` change handler using a shared callback.
    pub fn on_value_changed_shared(mut self, handler: impl Into<CallbackWith<Option<T>>>) -> Self {
        self.on_value_changed = Some(handler.into());
        self
    }

    /// Sets the `upper_value` change handler.
    pub fn on_upper_value_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(Option<T>) + Send + Sync + 'static,
    {
        self.on_upper_value_changed = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the `upper_value` change handler using a shared callback.
    pub fn on_upper_value_changed_shared(
        mut self,
        handler: impl Into<CallbackWith<Option<T>>>,
    ) -> Self {
        self.on_upper_value_changed = Some(handler.into());
        self
    }
}

impl<T> Default for SliderArgs<T> {
    fn default() -> Self {
        Self {
            mode: SliderMode::Single,
            min: None,
            max: None,
            step: None,
            value: None,
            upper_value: None,
            disabled: false,
            immediate: true,
            vertical: false,
            tick_marks: false,
            tick_mark_labels: Vec::new(),
            value_label: false,
            on_value_changed: None,
            on_upper_value_changed: None,
        }
    }
}

/// Outcome of assigning a handle value.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment<T> {
    /// The canonical value already matched; nothing was notified.
    Unchanged,
    /// The value was committed and the change handler was called with it.
    Changed(Option<T>),
    /// The value would break range ordering and was dropped.
    Rejected(RangeViolation),
}

impl<T> Assignment<T> {
    /// Whether the assignment committed a new value.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// Turns a rejection into [`SliderError::RangeOrder`].
    pub fn into_result(self) -> Result<Option<Option<T>>, SliderError> {
        match self {
            Self::Unchanged => Ok(None),
            Self::Changed(value) => Ok(Some(value)),
            Self::Rejected(violation) => Err(violation.into()),
        }
    }
}

/// Canonical value storage for a slider.
///
/// Handle values and domain bounds are held as canonical strings produced by
/// the injected [`Converter`]. Typed reads and numeric comparisons always go
/// back through that converter.
pub struct SliderState<T> {
    converter: Arc<dyn Converter<T>>,
    mode: SliderMode,
    value: Option<String>,
    upper_value: Option<String>,
    min: Option<String>,
    max: Option<String>,
    step: Option<String>,
    disabled: bool,
    immediate: bool,
    vertical: bool,
    tick_marks: bool,
    tick_mark_labels: Vec<String>,
    value_label: bool,
    tick_mark_count: usize,
    invalidated: bool,
    on_value_changed: Option<CallbackWith<Option<T>>>,
    on_upper_value_changed: Option<CallbackWith<Option<T>>>,
}

impl<T> SliderState<T>
where
    T: std::str::FromStr + fmt::Display + Clone + 'static,
    T::Err: fmt::Display,
{
    /// Creates a state over a number type using the invariant number format.
    pub fn numeric(args: SliderArgs<T>) -> Result<Self, SliderError> {
        Self::numeric_with_format(args, NumberFormat::INVARIANT)
    }

    /// Creates a state over a number type using a culture's number format.
    pub fn numeric_with_format(
        args: SliderArgs<T>,
        format: NumberFormat,
    ) -> Result<Self, SliderError> {
        Self::with_args(args, Arc::new(NumericConverter::with_format(format)))
    }
}

impl<T: Clone> SliderState<T> {
    /// Creates a single slider with no value.
    ///
    /// The track defaults to `0..100` with step `1` when the converter reads
    /// those numbers. Otherwise min, max and step start unset and have to be
    /// supplied through [`SliderArgs`] or the `set_*` methods.
    pub fn new(converter: Arc<dyn Converter<T>>) -> Self {
        let default_bound = |text: &str| converter.normalize(text).ok().flatten();
        let min = default_bound(DEFAULT_MIN);
        let max = default_bound(DEFAULT_MAX);
        let step = default_bound(DEFAULT_STEP);
        Self {
            converter,
            mode: SliderMode::Single,
            value: None,
            upper_value: None,
            min,
            max,
            step,
            disabled: false,
            immediate: true,
            vertical: false,
            tick_marks: false,
            tick_mark_labels: Vec::new(),
            value_label: false,
            tick_mark_count: 0,
            invalidated: false,
            on_value_changed: None,
            on_upper_value_changed: None,
        }
    }

    /// Creates a state and applies `args` to it.
    pub fn with_args(
        args: SliderArgs<T>,
        converter: Arc<dyn Converter<T>>,
    ) -> Result<Self, SliderError> {
        let mut state = Self::new(converter);
        let _ = state.apply(args)?;
        Ok(state)
    }

    /// Applies a parameter pass and reports the lower and upper assignments.
    ///
    /// Every supplied value must have a numeric form, otherwise the pass
    /// fails before anything is changed. Mode, bounds, flags and handlers are
    /// taken first, then the handle values go through the same ordering
    /// checks as [`Self::set_value`] and [`Self::set_upper_value`]. When the
    /// new lower value would not fit under the current upper value, the upper
    /// value is assigned first so a whole range can move past its old
    /// position in one pass. Handles left as `None` report
    /// [`Assignment::Unchanged`].
    pub fn apply(
        &mut self,
        args: SliderArgs<T>,
    ) -> Result<(Assignment<T>, Assignment<T>), SliderError> {
        let SliderArgs {
            mode,
            min,
            max,
            step,
            value,
            upper_value,
            disabled,
            immediate,
            vertical,
            tick_marks,
            tick_mark_labels,
            value_label,
            on_value_changed,
            on_upper_value_changed,
        } = args;

        let min = min.map(|min| self.converter.set(Some(&min)));
        let max = max.map(|max| self.converter.set(Some(&max)));
        let step = step.map(|step| self.converter.set(Some(&step)));
        let lower = value.map(|value| self.converter.set(Some(&value)));
        let upper = upper_value.map(|value| self.converter.set(Some(&value)));
        for canonical in [&min, &max, &step, &lower, &upper]
            .into_iter()
            .flatten()
            .flatten()
        {
            self.converter.to_decimal(canonical)?;
        }

        self.mode = mode;
        if let Some(min) = min {
            self.min = min;
        }
        if let Some(max) = max {
            self.max = max;
        }
        if let Some(step) = step {
            self.step = step;
        }
        self.disabled = disabled;
        self.immediate = immediate;
        self.vertical = vertical;
        self.tick_marks = tick_marks;
        self.tick_mark_labels = tick_mark_labels;
        self.value_label = value_label;
        if on_value_changed.is_some() {
            self.on_value_changed = on_value_changed;
        }
        if on_upper_value_changed.is_some() {
            self.on_upper_value_changed = on_upper_value_changed;
        }
        self.refresh_tick_marks();

        let upper_first = match (&lower, &upper) {
            (Some(Some(lower)), Some(_)) => self.crosses_upper(lower)?,
            _ => false,
        };

        let mut upper_assignment = Assignment::Unchanged;
        if upper_first && let Some(upper) = upper.clone() {
            upper_assignment = self.assign(Bound::Upper, upper)?;
        }
        let lower_assignment = match lower {
            Some(lower) => self.assign(Bound::Lower, lower)?,
            None => Assignment::Unchanged,
        };
        if !upper_first && let Some(upper) = upper {
            upper_assignment = self.assign(Bound::Upper, upper)?;
        }
        Ok((lower_assignment, upper_assignment))
    }

    fn crosses_upper(&self, lower: &str) -> Result<bool, SliderError> {
        if self.mode != SliderMode::Range {
            return Ok(false);
        }
        let Some(upper) = self.upper_value.as_deref() else {
            return Ok(false);
        };
        Ok(self.converter.to_decimal(lower)? >= self.converter.to_decimal(upper)?)
    }

    /// Assigns the (lower) handle value.
    pub fn set_value(&mut self, value: impl Into<Option<T>>) -> Result<Assignment<T>, SliderError> {
        let canonical = self.converter.set(value.into().as_ref());
        self.assign(Bound::Lower, canonical)
    }

    /// Assigns the upper handle value.
    pub fn set_upper_value(
        &mut self,
        value: impl Into<Option<T>>,
    ) -> Result<Assignment<T>, SliderError> {
        let canonical = self.converter.set(value.into().as_ref());
        self.assign(Bound::Upper, canonical)
    }

    /// Assigns the (lower) handle from raw text, e.g. a native input's value.
    ///
    /// Blank text clears the value. Text the converter cannot parse is
    /// reported and leaves the state untouched.
    pub fn set_value_text(&mut self, raw: &str) -> Result<Assignment<T>, SliderError> {
        let canonical = self.converter.normalize(raw)?;
        self.assign(Bound::Lower, canonical)
    }

    /// Assigns the upper handle from raw text.
    pub fn set_upper_value_text(&mut self, raw: &str) -> Result<Assignment<T>, SliderError> {
        let canonical = self.converter.normalize(raw)?;
        self.assign(Bound::Upper, canonical)
    }

    fn assign(
        &mut self,
        bound: Bound,
        canonical: Option<String>,
    ) -> Result<Assignment<T>, SliderError> {
        if self.canonical(bound) == canonical.as_deref() {
            trace!(%bound, ?canonical, "slider value unchanged");
            return Ok(Assignment::Unchanged);
        }

        let candidate = canonical
            .as_deref()
            .map(|text| self.converter.to_decimal(text))
            .transpose()?;
        if self.mode == SliderMode::Range
            && let (Some(candidate), Some(companion)) =
                (candidate, self.canonical(bound.companion()))
        {
            let companion = self.converter.to_decimal(companion)?;
            if let Err(violation) = check_order(bound, candidate, companion) {
                debug!(%violation, "rejected slider value");
                self.invalidated = true;
                return Ok(Assignment::Rejected(violation));
            }
        }

        let typed = self.converter.get(canonical.as_deref())?;
        debug!(%bound, ?canonical, "slider value changed");
        let (slot, handler) = match bound {
            Bound::Lower => (&mut self.value, &self.on_value_changed),
            Bound::Upper => (&mut self.upper_value, &self.on_upper_value_changed),
        };
        *slot = canonical;
        if let Some(handler) = handler {
            handler.call(typed.clone());
        }
        Ok(Assignment::Changed(typed))
    }
}

impl<T> SliderState<T> {
    fn canonical(&self, bound: Bound) -> Option<&str> {
        match bound {
            Bound::Lower => self.value.as_deref(),
            Bound::Upper => self.upper_value.as_deref(),
        }
    }

    /// The (lower) handle value.
    pub fn value(&self) -> Result<Option<T>, ConversionError> {
        self.converter.get(self.value.as_deref())
    }

    /// The upper handle value.
    pub fn upper_value(&self) -> Result<Option<T>, ConversionError> {
        self.converter.get(self.upper_value.as_deref())
    }

    /// Canonical text of the (lower) handle value.
    pub fn value_text(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Canonical text of the upper handle value.
    pub fn upper_value_text(&self) -> Option<&str> {
        self.upper_value.as_deref()
    }

    /// Lower end of the track.
    pub fn min(&self) -> Result<Option<T>, ConversionError> {
        self.converter.get(self.min.as_deref())
    }

    /// Upper end of the track.
    pub fn max(&self) -> Result<Option<T>, ConversionError> {
        self.converter.get(self.max.as_deref())
    }

    /// Distance between stops.
    pub fn step(&self) -> Result<Option<T>, ConversionError> {
        self.converter.get(self.step.as_deref())
    }

    /// Sets the lower end of the track.
    ///
    /// Handle values are not clamped into the new domain.
    pub fn set_min(&mut self, min: impl Into<Option<T>>) {
        self.min = self.converter.set(min.into().as_ref());
        self.refresh_tick_marks();
    }

    /// Sets the upper end of the track.
    pub fn set_max(&mut self, max: impl Into<Option<T>>) {
        self.max = self.converter.set(max.into().as_ref());
        self.refresh_tick_marks();
    }

    /// Sets the distance between stops.
    pub fn set_step(&mut self, step: impl Into<Option<T>>) {
        self.step = self.converter.set(step.into().as_ref());
        self.refresh_tick_marks();
    }

    /// Single or range slider.
    pub fn mode(&self) -> SliderMode {
        self.mode
    }

    /// Whether this is a range slider.
    pub fn is_range(&self) -> bool {
        self.mode == SliderMode::Range
    }

    /// Switches between single and range mode.
    ///
    /// Stored values are kept as they are; ordering is only checked on the
    /// next assignment.
    pub fn set_mode(&mut self, mode: SliderMode) {
        self.mode = mode;
    }

    /// Whether an assignment was rejected since the flag was last taken.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Reads and clears the invalidation flag.
    ///
    /// The UI layer uses this to snap a dragged handle back to the stored
    /// value after a rejected assignment.
    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    /// Width of the active track segment as a percentage of the track.
    pub fn fill_width(&self) -> Result<f64, SliderError> {
        let (min, max) = self.domain()?;
        geometry::fill_width(
            self.mode,
            self.decimal_of(self.value.as_deref())?,
            self.decimal_of(self.upper_value.as_deref())?,
            min,
            max,
        )
    }

    /// Start of the active track segment as a percentage of the track.
    pub fn fill_offset(&self) -> Result<f64, SliderError> {
        let (min, max) = self.domain()?;
        geometry::fill_offset(self.mode, self.decimal_of(self.value.as_deref())?, min, max)
    }

    /// Position of a handle as a percentage of the track.
    pub fn handle_position(&self, bound: Bound) -> Result<f64, SliderError> {
        let (min, max) = self.domain()?;
        geometry::track_percent(self.decimal_of(self.canonical(bound))?, min, max)
    }

    /// Number of tick marks, or `0` when tick marks are off.
    ///
    /// Computed when min, max, step or the tick mark flag change.
    pub fn tick_mark_count(&self) -> usize {
        self.tick_mark_count
    }

    /// The tick marks with their values, positions and labels.
    ///
    /// A track with more than 10 000 stops lists no marks; use
    /// [`Self::tick_mark_count`] for the number alone.
    pub fn tick_marks(&self) -> Result<Vec<TickMark<'_>>, SliderError> {
        if self.tick_mark_count == 0 {
            return Ok(Vec::new());
        }
        let (min, max) = self.domain()?;
        let step = self.decimal_of(self.step.as_deref())?;
        ticks::tick_marks(self.tick_mark_count, min, max, step, &self.tick_mark_labels)
    }

    /// Whether tick marks are shown.
    pub fn has_tick_marks(&self) -> bool {
        self.tick_marks
    }

    /// Turns tick marks on or off.
    pub fn set_tick_marks(&mut self, tick_marks: bool) {
        self.tick_marks = tick_marks;
        self.refresh_tick_marks();
    }

    /// Labels mapped to tick marks in index order.
    pub fn tick_mark_labels(&self) -> &[String] {
        &self.tick_mark_labels
    }

    /// Replaces the tick mark labels.
    pub fn set_tick_mark_labels(&mut self, labels: impl Into<Vec<String>>) {
        self.tick_mark_labels = labels.into();
    }

    /// Whether interaction is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables interaction.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether values commit while dragging.
    pub fn is_immediate(&self) -> bool {
        self.immediate
    }

    /// Chooses between commit-while-dragging and commit-on-release.
    pub fn set_immediate(&mut self, immediate: bool) {
        self.immediate = immediate;
    }

    /// Whether the track is laid out vertically.
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// Lays the track out vertically or horizontally.
    pub fn set_vertical(&mut self, vertical: bool) {
        self.vertical = vertical;
    }

    /// Whether the value is shown above the handle.
    pub fn has_value_label(&self) -> bool {
        self.value_label
    }

    /// Shows or hides the value above the handle.
    pub fn set_value_label(&mut self, value_label: bool) {
        self.value_label = value_label;
    }

    fn decimal_of(&self, canonical: Option<&str>) -> Result<Decimal, ConversionError> {
        canonical.map_or(Ok(Decimal::ZERO), |text| self.converter.to_decimal(text))
    }

    fn domain(&self) -> Result<(Decimal, Decimal), ConversionError> {
        Ok((
            self.decimal_of(self.min.as_deref())?,
            self.decimal_of(self.max.as_deref())?,
        ))
    }

    fn refresh_tick_marks(&mut self) {
        self.tick_mark_count = if self.tick_marks {
            match (self.domain(), self.decimal_of(self.step.as_deref())) {
                (Ok((min, max)), Ok(step)) => ticks::tick_count(min, max, step),
                (Err(err), _) | (_, Err(err)) => {
                    warn!(%err, "cannot compute tick marks");
                    0
                }
            }
        } else {
            0
        };
    }
}

impl<T> fmt::Debug for SliderState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderState")
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("upper_value", &self.upper_value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("tick_mark_count", &self.tick_mark_count)
            .field("invalidated", &self.invalidated)
            .finish_non_exhaustive()
    }
}
