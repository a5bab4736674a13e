use tracing::{debug, trace, warn};

use crate::core::PixelRect;
use crate::error::{ChartError, ChartResult};

use super::{
    ClipRect, DataToClipTransform, DataWindow, GpuContext, GpuContextFactory, GpuCustomSeries,
    GpuFrameContext, GpuViewport, OverlayPlacement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GpuSeriesId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuSeriesState {
    /// Registered before a context existed.
    Pending,
    Ready,
    /// Init failed; never drawn again.
    Inert,
}

struct RegisteredSeries {
    id: GpuSeriesId,
    series: Box<dyn GpuCustomSeries>,
    state: GpuSeriesState,
}

pub struct GpuOverlayCompositor {
    placement: OverlayPlacement,
    factory: Option<GpuContextFactory>,
    context: Option<Box<dyn GpuContext>>,
    series: Vec<RegisteredSeries>,
    next_id: u64,
}

impl std::fmt::Debug for GpuOverlayCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuOverlayCompositor")
            .field("placement", &self.placement)
            .field("has_context", &self.context.is_some())
            .field("series", &self.series.len())
            .finish()
    }
}

impl GpuOverlayCompositor {
    #[must_use]
    pub fn new(placement: OverlayPlacement) -> Self {
        Self {
            placement,
            factory: None,
            context: None,
            series: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn placement(&self) -> OverlayPlacement {
        self.placement
    }

    #[must_use]
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn state(&self, id: GpuSeriesId) -> Option<GpuSeriesState> {
        self.series
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.state)
    }

    /// Creates the shared context and initializes every pending series.
    ///
    /// Replacing an existing context destroys series resources on the old one
    /// and initializes them again on the new one. Inert series stay inert.
    pub fn set_context_factory(&mut self, mut factory: GpuContextFactory) -> ChartResult<()> {
        self.destroy_ready_series();
        self.context = None;
        let created = factory();
        self.factory = Some(factory);
        let context = created?;
        self.context = Some(context);

        let Self {
            context, series, ..
        } = self;
        if let Some(context) = context.as_deref_mut() {
            for entry in series
                .iter_mut()
                .filter(|entry| entry.state == GpuSeriesState::Pending)
            {
                init_series(context, entry);
            }
        }
        debug!(series = self.series.len(), "gpu context created");
        Ok(())
    }

    /// Rebuilds the context through the stored factory, e.g. after a device loss.
    pub fn recreate_context(&mut self) -> ChartResult<()> {
        let factory = self.factory.take().ok_or_else(|| {
            ChartError::InvalidConfig("no gpu context factory has been set".to_owned())
        })?;
        self.set_context_factory(factory)
    }

    pub fn register(&mut self, series: Box<dyn GpuCustomSeries>) -> GpuSeriesId {
        let id = GpuSeriesId(self.next_id);
        self.next_id += 1;
        let mut entry = RegisteredSeries {
            id,
            series,
            state: GpuSeriesState::Pending,
        };
        if let Some(context) = self.context.as_deref_mut() {
            init_series(context, &mut entry);
        }
        debug!(series = entry.series.name(), state = ?entry.state, "gpu series registered");
        self.series.push(entry);
        id
    }

    /// Destroys and removes one series. Returns `false` for unknown ids.
    pub fn unregister(&mut self, id: GpuSeriesId) -> bool {
        let Some(position) = self.series.iter().position(|entry| entry.id == id) else {
            return false;
        };
        let mut entry = self.series.remove(position);
        if entry.state == GpuSeriesState::Ready
            && let Some(context) = self.context.as_deref_mut()
        {
            entry.series.on_destroy(context);
        }
        debug!(series = entry.series.name(), "gpu series unregistered");
        true
    }

    pub fn clear_all(&mut self) {
        self.destroy_ready_series();
        self.series.clear();
    }

    /// Draws one frame. Returns how many series rendered successfully.
    pub fn render(
        &mut self,
        viewport: GpuViewport,
        window: DataWindow,
        clip: Option<ClipRect>,
    ) -> ChartResult<usize> {
        let Some(context) = self.context.as_deref_mut() else {
            trace!("gpu frame skipped: no context");
            return Ok(0);
        };
        viewport.validate()?;

        let (width, height) = viewport.surface_size();
        if context.surface_size() != (width, height) {
            context.resize_surface(width, height)?;
            debug!(width, height, "gpu surface resized");
        }
        context.disable_scissor();
        let full = PixelRect::new(0, 0, width, height);
        context.set_viewport(full);
        context.clear_transparent();

        let frame = GpuFrameContext {
            viewport,
            surface_width: width,
            surface_height: height,
            transform: DataToClipTransform::from_window(window)?,
            clip: clip.map_or(full, |clip| {
                clip.to_pixel_rect(viewport.device_pixel_ratio, (width, height))
            }),
        };

        let mut draw_order: Vec<usize> = (0..self.series.len()).collect();
        draw_order.sort_by_key(|&index| self.series[index].series.order());

        let mut drawn = 0;
        for index in draw_order {
            let entry = &mut self.series[index];
            if entry.state != GpuSeriesState::Ready {
                continue;
            }
            match entry.series.render(context, &frame) {
                Ok(()) => drawn += 1,
                Err(err) => {
                    warn!(series = entry.series.name(), error = %err, "gpu series render failed");
                }
            }
        }
        trace!(drawn, "gpu frame rendered");
        Ok(drawn)
    }

    fn destroy_ready_series(&mut self) {
        let Self {
            context, series, ..
        } = self;
        let Some(context) = context.as_deref_mut() else {
            return;
        };
        for entry in series
            .iter_mut()
            .filter(|entry| entry.state == GpuSeriesState::Ready)
        {
            entry.series.on_destroy(context);
            entry.state = GpuSeriesState::Pending;
        }
    }
}

impl Drop for GpuOverlayCompositor {
    fn drop(&mut self) {
        self.clear_all();
    }
}

fn init_series(context: &mut dyn GpuContext, entry: &mut RegisteredSeries) {
    entry.state = match entry.series.on_init(context) {
        Ok(()) => GpuSeriesState::Ready,
        Err(err) => {
            let err = match err {
                err @ ChartError::GpuResource { .. } => err,
                other => ChartError::GpuResource {
                    series: entry.series.name().to_owned(),
                    reason: other.to_string(),
                },
            };
            warn!(error = %err, "gpu series init failed; series left inert");
            GpuSeriesState::Inert
        }
    };
}
