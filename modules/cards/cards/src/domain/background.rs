//! Background editor state: one visible tab, one stored background.

use cards_sdk::{Background, BackgroundType};

use super::upload::{UploadCandidate, UploadPolicy, UploadRejection};

pub const GRADIENT_PRESETS: [&str; 8] = [
    "from-blue-500 to-purple-600",
    "from-green-400 to-blue-500",
    "from-yellow-400 to-red-500",
    "from-pink-500 to-purple-500",
    "from-gray-700 to-gray-900",
    "from-teal-300 to-blue-500",
    "from-red-500 to-orange-500",
    "from-indigo-500 to-blue-500",
];

pub const COLOR_PRESETS: [&str; 10] = [
    "#FFC0CB", "#ADD8E6", "#90EE90", "#FFD700", "#D3D3D3", "#FFFFFF", "#000000", "#800080",
    "#FFA500", "#FF4500",
];

/// Proof that an upload passed validation and the selector is waiting for it.
#[derive(Debug)]
#[must_use]
pub struct UploadTicket {
    _private: (),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundSelector {
    active_tab: BackgroundType,
    current: Background,
    dark_mode: bool,
    uploading: bool,
}

impl Default for BackgroundSelector {
    fn default() -> Self {
        Self::new(Background::default(), false)
    }
}

impl BackgroundSelector {
    #[must_use]
    pub fn new(current: Background, dark_mode: bool) -> Self {
        Self {
            active_tab: current.kind(),
            current,
            dark_mode,
            uploading: false,
        }
    }

    #[must_use]
    pub fn active_tab(&self) -> BackgroundType {
        self.active_tab
    }

    #[must_use]
    pub fn current(&self) -> &Background {
        &self.current
    }

    #[must_use]
    pub fn into_background(self) -> Background {
        self.current
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Changes only the visible editor.
    pub fn switch_tab(&mut self, kind: BackgroundType) {
        self.active_tab = kind;
    }

    /// Stores a gradient token. Blank input keeps the current background.
    pub fn choose_gradient(&mut self, token: &str) {
        if let Some(bg) = Background::gradient(token) {
            self.active_tab = BackgroundType::Gradient;
            self.current = bg;
        }
    }

    /// Stores a flat color. Blank input keeps the current background.
    pub fn choose_color(&mut self, value: &str) {
        if let Some(bg) = Background::color(value) {
            self.active_tab = BackgroundType::Color;
            self.current = bg;
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Validates a candidate image and marks an upload as in flight. A
    /// rejected candidate reverts the background to the default gradient;
    /// `Busy` leaves the in-flight upload untouched.
    pub fn begin_upload(
        &mut self,
        candidate: &UploadCandidate,
        policy: &UploadPolicy,
    ) -> Result<UploadTicket, UploadRejection> {
        if self.uploading {
            return Err(UploadRejection::Busy);
        }
        if let Err(rejection) = policy.check(candidate) {
            self.reset_to_default();
            return Err(rejection);
        }
        self.uploading = true;
        self.active_tab = BackgroundType::Image;
        Ok(UploadTicket { _private: () })
    }

    /// Completes the in-flight upload. On failure the background reverts to
    /// the default gradient and the reason is handed back.
    pub fn finish_upload(
        &mut self,
        _ticket: UploadTicket,
        result: Result<String, String>,
    ) -> Result<(), String> {
        self.uploading = false;
        match result.map(|url| Background::image(&url).ok_or(url)) {
            Ok(Ok(bg)) => {
                self.current = bg;
                Ok(())
            }
            Ok(Err(_)) => self.revert("upload returned an empty URL".to_owned()),
            Err(reason) => self.revert(reason),
        }
    }

    fn revert(&mut self, reason: String) -> Result<(), String> {
        self.reset_to_default();
        Err(reason)
    }

    fn reset_to_default(&mut self) {
        self.current = Background::default();
        self.active_tab = BackgroundType::Gradient;
    }
}
