use actix_web::web;

pub mod routes {
    pub mod order;
}

mod services {
    pub(crate) mod order;
}
mod dtos {
    pub(crate) mod order;
}

/// Order endpoints; expects to be wrapped by the auth middleware.
pub fn mount_orders() -> actix_web::Scope {
    web::scope("/order")
        .service(routes::order::post_order)
        .service(routes::order::get_orders)
}
