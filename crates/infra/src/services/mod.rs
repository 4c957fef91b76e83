mod directory;
mod notification;

pub use directory::{HttpUserDirectory, IUserDirectory, InMemoryUserDirectory};
pub use notification::{
    topics_for_user, GatewayNotificationPublisher, INotificationPublisher,
    InMemoryNotificationPublisher, PublishedMessage,
};
