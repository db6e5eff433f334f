pub mod shared {
    pub mod core {
        pub mod entity;
        pub mod fields;
        pub mod primitives;
        pub mod query;
        pub mod validation;
    }
    pub mod infrastructure {
        pub mod auth;
        pub mod entity_store;
    }
}

pub mod modules {
    pub mod entities {
        pub mod use_cases {
            pub mod endpoint;
            pub mod service;
        }
        pub mod inbound {
            pub mod graphql;
            pub mod http;
        }
    }
    pub mod clients {
        pub mod core {
            pub mod client;
        }
        pub mod inbound {
            pub mod graphql;
        }
    }
    pub mod sample_persons {
        pub mod core {
            pub mod sample_person;
        }
        pub mod inbound {
            pub mod graphql;
        }
    }
    pub mod users {
        pub mod core {
            pub mod user;
        }
        pub mod use_cases {
            pub mod authenticated_user;
        }
        pub mod inbound {
            pub mod graphql;
            pub mod http;
        }
    }
}

pub mod shell;
