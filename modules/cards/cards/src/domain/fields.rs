pub struct CardFields;

impl CardFields {
    pub const NAME: &'static str = "name";
    pub const USERNAME: &'static str = "username";
    pub const PROFILE_PICTURE_URL: &'static str = "profile_picture_url";
    pub const BACKGROUND_VALUE: &'static str = "background_value";
    pub const WHATSAPP: &'static str = "whatsapp";
    pub const INSTAGRAM: &'static str = "instagram";
    pub const LOCATION: &'static str = "location";
}
