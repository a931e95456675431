use actix_web::web;

mod auth;
mod attendance;
mod cashflow;
mod sales;
mod setoran;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/api")
            .service(web::scope("/auth")
                .configure(auth::config))
            .service(web::scope("/setoran")
                .configure(setoran::config))
            .service(web::scope("/attendance")
                .configure(attendance::config))
            .service(web::scope("/sales")
                .configure(sales::config))
            .service(web::scope("/cashflow")
                .configure(cashflow::config)));
}
