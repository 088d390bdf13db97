// Image module
// Bundled sample images selectable for an event

/// One bundled sample image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSample {
    pub id: &'static str,
    pub label: &'static str,
    pub asset_name: &'static str,
}

/// The bundled catalog, in display order. The first entry doubles as the
/// default for new events and for unknown ids.
pub const SAMPLES: [ImageSample; 3] = [
    ImageSample {
        id: "birthday",
        label: "誕生日",
        asset_name: "happy_birthday",
    },
    ImageSample {
        id: "anniversary",
        label: "記念日",
        asset_name: "anniversary",
    },
    ImageSample {
        id: "sunset",
        label: "夕焼け",
        asset_name: "image_sample",
    },
];

pub fn default_sample() -> &'static ImageSample {
    &SAMPLES[0]
}

/// Look up a sample by id, falling back to the default so stale ids in old
/// snapshots still render something.
pub fn find(id: &str) -> &'static ImageSample {
    SAMPLES
        .iter()
        .find(|sample| sample.id == id)
        .unwrap_or_else(default_sample)
}

pub fn is_known(id: &str) -> bool {
    SAMPLES.iter().any(|sample| sample.id == id)
}
