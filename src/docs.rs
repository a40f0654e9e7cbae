use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    ConfirmOtpResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto,
    SendOtpRequest, VerifyOtpRequest,
};
use crate::modules::colleges::model::{College, CreateCollegeDto, UpdateCollegeDto};
use crate::modules::products::model::{CreateProductDto, Product, UpdateProductDto};
use crate::modules::users::model::{Role, UserProfile, VerificationData};
use crate::modules::verification::model::{
    ManualVerifyRequest, ManualVerifyResponse, UploadIdResponse,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::send_otp,
        crate::modules::auth::controller::verify_otp,
        crate::modules::auth::controller::login,
        crate::modules::verification::controller::manual_verify,
        crate::modules::verification::controller::upload_id,
        crate::modules::colleges::controller::list_colleges,
        crate::modules::colleges::controller::create_college,
        crate::modules::colleges::controller::update_college,
        crate::modules::colleges::controller::delete_college,
        crate::modules::products::controller::list_products,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
    ),
    components(schemas(
        RegisterRequestDto,
        SendOtpRequest,
        VerifyOtpRequest,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        ConfirmOtpResponse,
        ErrorResponse,
        ManualVerifyRequest,
        ManualVerifyResponse,
        UploadIdResponse,
        College,
        CreateCollegeDto,
        UpdateCollegeDto,
        Product,
        CreateProductDto,
        UpdateProductDto,
        Role,
        UserProfile,
        VerificationData,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, OTP lifecycle, and login"),
        (name = "Verification", description = "Manual verification and ID upload"),
        (name = "Colleges", description = "College catalog"),
        (name = "Products", description = "Marketplace products")
    )
)]
pub struct ApiDoc;
