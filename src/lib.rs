pub mod shared {
    pub mod core {
        pub mod aggregate;
        pub mod messages;
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod bus;
        pub mod event_store;
        pub mod repository;
        pub mod runtime;
        pub mod session;
    }
}

pub mod modules {
    pub mod inventory {
        pub mod core {
            pub mod decision;
            pub mod events;
            pub mod evolve;
            pub mod state;
        }
        pub mod use_cases {
            pub mod manage_inventory_item {
                pub mod commands;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod view_inventory {
                pub mod projection;
                pub mod queries_port;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
        pub mod module;
    }
}

pub mod shell;
