pub mod pages;
pub mod palette;
pub mod qr;
pub mod view;

pub use pages::{
    Banner, DashboardPage, RenderError, render_about_page, render_card, render_dashboard_page,
    render_home_page, render_login_page, render_not_found_page, render_public_page,
    render_qr_block, render_signup_page,
};
pub use palette::Palette;
pub use qr::{QrEncoder, QrError, QrGraphic, QrRequest};
pub use view::CardView;
