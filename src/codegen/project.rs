//! Project-level files: the Maven build descriptor and the datasource configuration.

use crate::settings::GeneratorSettings;

pub fn render_pom(settings: &GeneratorSettings) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>{boot}</version>
        <relativePath/>
    </parent>
    <groupId>{group}</groupId>
    <artifactId>{artifact}</artifactId>
    <version>0.0.1-SNAPSHOT</version>
    <name>{artifact}</name>
    <description>Spring Boot ORM project</description>
    <properties>
        <java.version>{java}</java.version>
    </properties>
    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-data-jpa</artifactId>
        </dependency>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
        <dependency>
            <groupId>org.postgresql</groupId>
            <artifactId>postgresql</artifactId>
            <scope>runtime</scope>
        </dependency>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-test</artifactId>
            <scope>test</scope>
        </dependency>
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-maven-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#,
        boot = settings.spring_boot_version,
        group = settings.group_id,
        artifact = settings.artifact_id,
        java = settings.java_version,
    )
}

pub fn render_application_properties(settings: &GeneratorSettings) -> String {
    let ds = &settings.datasource;
    format!(
        "spring.datasource.url={}\n\
         spring.datasource.username={}\n\
         spring.datasource.password={}\n\
         spring.jpa.hibernate.ddl-auto=update\n\
         spring.jpa.show-sql=true\n\
         spring.jpa.properties.hibernate.dialect=org.hibernate.dialect.PostgreSQLDialect\n\
         spring.jpa.properties.hibernate.format_sql=true\n",
        ds.url, ds.username, ds.password
    )
}
