use actix_web::web;

pub mod routes {
    pub mod cart;
}

mod services {
    pub(crate) mod cart;
}
mod dtos {
    pub(crate) mod cart;
}

/// Cart endpoints; expects to be wrapped by the auth middleware.
pub fn mount_cart() -> actix_web::Scope {
    web::scope("/cart")
        .service(routes::cart::get_cart)
        .service(routes::cart::post_add_to_cart)
        .service(routes::cart::delete_from_cart)
}
