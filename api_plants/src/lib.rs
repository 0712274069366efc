use actix_web::web;

pub mod routes {
    pub mod plant;
}

mod services {
    pub(crate) mod plant;
}
mod dtos {
    pub(crate) mod plant;
}

pub fn mount_plants() -> actix_web::Scope {
    web::scope("/plants")
        .service(routes::plant::get_plants)
        .service(routes::plant::get_plants_by_category)
}
